// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query executor - runs synthesized statements against a session's store

use super::result::QueryResult;
use crate::storage::TabularStore;

/// Prefix of every execution diagnostic
pub const SQL_ERROR_PREFIX: &str = "SQL Error";

/// Executes statements against one session's tabular store
///
/// Execution never fails from the caller's point of view: a statement that
/// cannot run (malformed, unknown table or column, type mismatch, attempted
/// write) yields an empty [`QueryResult`] whose `error` holds the diagnostic.
pub struct QueryExecutor<'s> {
    store: &'s TabularStore,
}

impl<'s> QueryExecutor<'s> {
    pub fn new(store: &'s TabularStore) -> Self {
        Self { store }
    }

    /// Execute a statement, absorbing failures into an empty result
    pub fn execute(&self, statement: &str) -> QueryResult {
        match self.store.query(statement) {
            Ok(result) => {
                log::debug!(
                    "Statement returned {} rows in {} ms",
                    result.row_count(),
                    result.execution_time_ms
                );
                result
            }
            Err(e) => {
                let message = format!("{}: {}", SQL_ERROR_PREFIX, e);
                log::warn!("Statement failed: {} ({})", statement.trim(), e);
                QueryResult::failed(message)
            }
        }
    }
}
