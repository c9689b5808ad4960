// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Table and column name normalization

use super::IngestError;
use std::path::Path;

/// Derive a table name from an uploaded file name
///
/// The extension is dropped, the rest is lower-cased and every whitespace
/// character becomes an underscore: `Q1 Sales.csv` -> `q1_sales`.
pub fn derive_table_name(file_name: &str) -> Result<String, IngestError> {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = underscore_whitespace(stem.trim()).to_lowercase();
    if name.is_empty() {
        return Err(IngestError::InvalidName(file_name.to_string()));
    }
    Ok(name)
}

/// Normalize a header cell into a column name
///
/// Leading/trailing whitespace is stripped, inner whitespace characters become
/// underscores and the result is lower-cased. Blank headers are named after
/// their 1-based position (`column_3`).
pub fn normalize_column_name(raw: &str, index: usize) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return format!("column_{}", index + 1);
    }
    underscore_whitespace(trimmed).to_lowercase()
}

fn underscore_whitespace(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
