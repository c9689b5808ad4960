// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query execution results

use crate::storage::{ColumnType, Value};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Query execution result for a synthesized statement
///
/// A failed execution is represented as an empty result carrying a diagnostic
/// in `error`. Callers that only look at rows see "no data"; callers that need
/// to tell the two apart check [`QueryResult::is_failure`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    /// Result column names in select-list order
    pub columns: Vec<String>,
    /// Types inferred from the returned values, one per column
    pub column_types: Vec<ColumnType>,
    pub rows: Vec<Row>,
    pub execution_time_ms: u64,
    /// Human-readable diagnostic when the statement could not be executed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    /// Create a successful result
    pub fn new(columns: Vec<String>, column_types: Vec<ColumnType>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            column_types,
            rows,
            execution_time_ms: 0,
            error: None,
        }
    }

    /// Create the empty result returned for a statement that failed to run
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// True when there are no rows, whether or not execution failed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the statement could not be executed
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at a row index for a named column
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Render up to `limit` rows as an aligned plain-text table without an index
    pub fn to_plain_text(&self, limit: usize) -> String {
        let shown: Vec<Vec<String>> = self
            .rows
            .iter()
            .take(limit)
            .map(|row| row.values.iter().map(|v| v.to_string()).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                shown
                    .iter()
                    .filter_map(|cells| cells.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let render_line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut lines = Vec::with_capacity(shown.len() + 1);
        lines.push(render_line(&self.columns));
        for cells in &shown {
            lines.push(render_line(cells));
        }
        lines.join("\n")
    }

    /// Write the whole result as CSV (header row first)
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for row in &self.rows {
            out.write_record(row.values.iter().map(|v| match v {
                Value::Null => String::new(),
                other => other.to_string(),
            }))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Single result row, values ordered like [`QueryResult::columns`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Value at a column position
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue_result() -> QueryResult {
        QueryResult::new(
            vec!["product".into(), "revenue".into()],
            vec![ColumnType::Text, ColumnType::Real],
            vec![
                Row::new(vec![Value::from("apple"), Value::Real(12.5)]),
                Row::new(vec![Value::from("kiwi, gold"), Value::Real(100.0)]),
            ],
        )
    }

    #[test]
    fn test_failed_result_is_empty_with_diagnostic() {
        let result = QueryResult::failed("no such table: nope");
        assert!(result.is_empty());
        assert!(result.is_failure());
        assert!(result.columns.is_empty());
    }

    #[test]
    fn test_plain_text_is_right_aligned() {
        let text = revenue_result().to_plain_text(10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   product revenue");
        assert_eq!(lines[1], "     apple    12.5");
        assert_eq!(lines[2], "kiwi, gold   100.0");
    }

    #[test]
    fn test_plain_text_respects_limit() {
        let text = revenue_result().to_plain_text(1);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_write_csv_quotes_fields() {
        let mut buffer = Vec::new();
        revenue_result().write_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv, "product,revenue\napple,12.5\n\"kiwi, gold\",100.0\n");
    }

    #[test]
    fn test_value_lookup_by_column() {
        let result = revenue_result();
        assert_eq!(result.value(1, "revenue"), Some(&Value::Real(100.0)));
        assert_eq!(result.value(0, "missing"), None);
    }
}
