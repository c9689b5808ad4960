// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! File ingestion
//!
//! Turns uploaded delimited files into typed relations:
//! - table names derived from file names
//! - column names normalized from the header row
//! - column types inferred from the cells

pub mod inference;
pub mod loader;
pub mod naming;

pub use loader::{load_csv, load_reader};

use crate::storage::StoreError;
use thiserror::Error;

/// Errors raised while loading one file
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{0}' is empty or has no header row")]
    Empty(String),

    #[error("File '{file}' is malformed at line {line}: {message}")]
    Malformed {
        file: String,
        line: u64,
        message: String,
    },

    #[error("File '{file}' has more than one column named '{column}' after normalization")]
    DuplicateColumn { file: String, column: String },

    #[error("Cannot derive a table name from '{0}'")]
    InvalidName(String),

    #[error("Failed to store relation '{relation}': {source}")]
    Store {
        relation: String,
        #[source]
        source: StoreError,
    },
}

/// Summary of a relation that was loaded successfully
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRelation {
    pub file: String,
    pub table: String,
    pub columns: Vec<String>,
    pub rows: usize,
}

/// Outcome of loading one file in a batch
#[derive(Debug)]
pub struct LoadOutcome {
    pub file: String,
    pub result: Result<LoadedRelation, IngestError>,
}

impl LoadOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
