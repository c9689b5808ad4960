// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tabular store - session-scoped in-memory relational engine
//!
//! Each store owns exactly one in-memory SQLite connection. Stores are never
//! shared between sessions, so uploaded data stays isolated per session.

use super::types::{Relation, StoreError, StoreResult};
use super::value::{ColumnType, Value};
use crate::exec::{QueryResult, Row};
use rusqlite::limits::Limit;
use rusqlite::Connection;
use std::time::Instant;

/// In-memory relational store holding the relations of one session
pub struct TabularStore {
    conn: Connection,
}

impl TabularStore {
    /// Open a fresh, empty in-memory store
    ///
    /// Attaching other databases is disabled, so no statement can reach a
    /// file on disk or another session's data.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.set_limit(Limit::SQLITE_LIMIT_ATTACHED, 0);
        Ok(Self { conn })
    }

    /// Create or replace the backing table for a relation
    ///
    /// The drop, create and bulk insert run inside one transaction: if any row
    /// fails to load, the previous relation of the same name is left intact.
    pub fn replace_relation(&mut self, relation: &Relation) -> StoreResult<()> {
        if relation.columns.is_empty() {
            return Err(StoreError::NoColumns(relation.name.clone()));
        }

        let table = quote_identifier(&relation.name);
        let width = relation.columns.len();

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;

        let column_defs = relation
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_identifier(&c.name), c.column_type.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");
        tx.execute(&format!("CREATE TABLE {} ({})", table, column_defs), [])?;

        {
            let placeholders = vec!["?"; width].join(", ");
            let mut insert =
                tx.prepare(&format!("INSERT INTO {} VALUES ({})", table, placeholders))?;

            for (index, row) in relation.rows.iter().enumerate() {
                if row.len() != width {
                    return Err(StoreError::RowWidth {
                        relation: relation.name.clone(),
                        row: index + 1,
                        expected: width,
                        got: row.len(),
                    });
                }
                insert.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }

        tx.commit()?;

        log::debug!(
            "Stored relation '{}' ({} columns, {} rows)",
            relation.name,
            width,
            relation.rows.len()
        );
        Ok(())
    }

    /// Run a single read-only statement and collect every row
    pub fn query(&self, sql: &str) -> StoreResult<QueryResult> {
        let started = Instant::now();

        let mut stmt = self.conn.prepare(sql)?;
        if !stmt.readonly() {
            return Err(StoreError::NotReadOnly(sql.trim().to_string()));
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                values.push(Value::from_sql_ref(row.get_ref(index)?));
            }
            rows.push(Row::new(values));
        }

        let column_types = (0..width)
            .map(|index| ColumnType::from_values(rows.iter().filter_map(|r| r.get(index))))
            .collect();

        let mut result = QueryResult::new(columns, column_types, rows);
        result.execution_time_ms = started.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// Names of all tables currently held, sorted
    pub fn table_names(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Number of rows held by a table
    pub fn row_count(&self, table: &str) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(table)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

/// Quote an identifier for SQLite, doubling embedded quotes
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
