// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Relation data structures and error types
//!
//! Defines the Relation held by the tabular store, along with error types
//! for store operations.

use crate::storage::value::{ColumnType, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for tabular store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQL engine error: {0}")]
    Engine(#[from] rusqlite::Error),

    #[error("Relation '{0}' has no columns")]
    NoColumns(String),

    #[error("Row {row} of relation '{relation}' has {got} values, expected {expected}")]
    RowWidth {
        relation: String,
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Only read-only queries are allowed: {0}")]
    NotReadOnly(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A named, typed column of a relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// A named table built from one uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl Relation {
    pub fn new(name: impl Into<String>, columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
