// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Column type inference for delimited files
//!
//! Every column is typed from all of its non-empty cells: the narrowest type
//! that accepts every cell wins, falling back to text.

use crate::storage::{ColumnType, Value};
use chrono::NaiveDate;

/// Date layouts recognised as date columns
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Canonical layout dates are stored in
const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Infer the type of a column from its raw cells
pub fn infer_column_type<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen_any = false;
    let mut all_integer = true;
    let mut all_numeric = true;
    let mut all_boolean = true;
    let mut all_date = true;

    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        seen_any = true;

        let integer = cell.parse::<i64>().is_ok();
        all_integer &= integer;
        all_numeric &= integer || parse_real(cell).is_some();
        all_boolean &= parse_boolean(cell).is_some();
        all_date &= parse_date(cell).is_some();

        if !(all_integer || all_numeric || all_boolean || all_date) {
            return ColumnType::Text;
        }
    }

    if !seen_any {
        ColumnType::Null
    } else if all_integer {
        ColumnType::Integer
    } else if all_numeric {
        ColumnType::Real
    } else if all_boolean {
        ColumnType::Boolean
    } else if all_date {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}

/// Convert a raw cell into a value of the column's inferred type
///
/// Empty cells are null. A cell that does not fit the column type (which
/// cannot happen for types produced by [`infer_column_type`]) is kept as text.
pub fn convert_cell(cell: &str, column_type: ColumnType) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    let converted = match column_type {
        ColumnType::Integer => trimmed.parse::<i64>().ok().map(Value::Integer),
        ColumnType::Real => parse_real(trimmed).map(Value::Real),
        ColumnType::Boolean => parse_boolean(trimmed).map(|b| Value::Integer(b as i64)),
        ColumnType::Date => parse_date(trimmed)
            .map(|d| Value::Text(d.format(CANONICAL_DATE_FORMAT).to_string())),
        ColumnType::Text | ColumnType::Null => None,
    };

    converted.unwrap_or_else(|| Value::Text(cell.to_string()))
}

fn parse_real(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_boolean(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_inference() {
        assert_eq!(infer_column_type(["1", "2", " 3 "]), ColumnType::Integer);
        assert_eq!(infer_column_type(["1", "2.5", ""]), ColumnType::Real);
        assert_eq!(infer_column_type(["1", "two"]), ColumnType::Text);
        assert_eq!(infer_column_type(["nan", "inf"]), ColumnType::Text);
    }

    #[test]
    fn test_boolean_and_date_inference() {
        assert_eq!(infer_column_type(["true", "FALSE"]), ColumnType::Boolean);
        assert_eq!(
            infer_column_type(["2024-01-05", "2024/02/29"]),
            ColumnType::Date
        );
        assert_eq!(infer_column_type(["2024-02-30"]), ColumnType::Text);
    }

    #[test]
    fn test_empty_column_is_null() {
        assert_eq!(infer_column_type(["", "  "]), ColumnType::Null);
        assert_eq!(infer_column_type(std::iter::empty::<&str>()), ColumnType::Null);
    }

    #[test]
    fn test_convert_cell() {
        assert_eq!(convert_cell("42", ColumnType::Integer), Value::Integer(42));
        assert_eq!(convert_cell("4.5", ColumnType::Real), Value::Real(4.5));
        assert_eq!(convert_cell("True", ColumnType::Boolean), Value::Integer(1));
        assert_eq!(
            convert_cell("2024/03/07", ColumnType::Date),
            Value::Text("2024-03-07".to_string())
        );
        assert_eq!(convert_cell("", ColumnType::Integer), Value::Null);
        assert_eq!(
            convert_cell(" Widget ", ColumnType::Text),
            Value::Text(" Widget ".to_string())
        );
    }
}
