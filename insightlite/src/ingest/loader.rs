// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Delimited-file loader
//!
//! Parses a header-first CSV file into a typed [`Relation`]. Loading one file
//! never depends on any other file.

use super::inference::{convert_cell, infer_column_type};
use super::naming::{derive_table_name, normalize_column_name};
use super::IngestError;
use crate::storage::{Column, Relation};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a CSV file from disk, naming the relation after the file
pub fn load_csv(path: &Path) -> Result<Relation, IngestError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    load_reader(&file_name, file)
}

/// Load CSV content from any reader, naming the relation after `file_name`
pub fn load_reader<R: Read>(file_name: &str, reader: R) -> Result<Relation, IngestError> {
    let table = derive_table_name(file_name)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| malformed(file_name, &e))?
        .clone();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::Empty(file_name.to_string()));
    }

    let column_names = normalize_headers(file_name, &headers)?;

    let mut records = Vec::new();
    for record in csv_reader.records() {
        records.push(record.map_err(|e| malformed(file_name, &e))?);
    }

    let columns: Vec<Column> = column_names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let column_type =
                infer_column_type(records.iter().map(|r| r.get(index).unwrap_or("")));
            Column::new(name, column_type)
        })
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    convert_cell(record.get(index).unwrap_or(""), column.column_type)
                })
                .collect()
        })
        .collect();

    let relation = Relation::new(table, columns, rows);
    log::info!(
        "Parsed '{}' into relation '{}' ({} columns, {} rows)",
        file_name,
        relation.name,
        relation.columns.len(),
        relation.row_count()
    );
    Ok(relation)
}

fn normalize_headers(
    file_name: &str,
    headers: &csv::StringRecord,
) -> Result<Vec<String>, IngestError> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for (index, raw) in headers.iter().enumerate() {
        let name = normalize_column_name(raw, index);
        if !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateColumn {
                file: file_name.to_string(),
                column: name,
            });
        }
        names.push(name);
    }

    Ok(names)
}

fn malformed(file_name: &str, error: &csv::Error) -> IngestError {
    IngestError::Malformed {
        file: file_name.to_string(),
        line: error.position().map(|p| p.line()).unwrap_or(0),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ColumnType, Value};

    #[test]
    fn test_load_reader_types_and_names() {
        let data = "Date, Product ,Quantity,Unit Price\n2024-01-01,Widget,3,2.50\n2024-01-02,Gadget,,4\n";
        let relation = load_reader("Daily Sales.csv", data.as_bytes()).unwrap();

        assert_eq!(relation.name, "daily_sales");
        assert_eq!(
            relation.column_names(),
            vec!["date", "product", "quantity", "unit_price"]
        );
        let types: Vec<ColumnType> = relation.columns.iter().map(|c| c.column_type).collect();
        assert_eq!(
            types,
            vec![
                ColumnType::Date,
                ColumnType::Text,
                ColumnType::Integer,
                ColumnType::Real
            ]
        );
        assert_eq!(relation.rows[1][2], Value::Null);
        assert_eq!(relation.rows[1][3], Value::Real(4.0));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let data = "a,b\n1,2\n3\n";
        let err = load_reader("ragged.csv", data.as_bytes()).unwrap_err();
        match err {
            IngestError::Malformed { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_file() {
        let err = load_reader("empty.csv", "".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::Empty(_)));
    }

    #[test]
    fn test_duplicate_column_after_normalization() {
        let data = "Unit Price,unit_price\n1,2\n";
        let err = load_reader("dup.csv", data.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateColumn { ref column, .. } if column == "unit_price"));
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let relation = load_reader("blank.csv", "a,b\n".as_bytes()).unwrap();
        assert_eq!(relation.row_count(), 0);
        assert_eq!(relation.columns[0].column_type, ColumnType::Null);
    }
}
