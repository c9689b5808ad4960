// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema registry implementation
//!
//! This module provides the SchemaRegistry that tracks every relation loaded
//! into a session and renders the schema description handed to the model.
//! The description is a pure projection of the registered relations.

use crate::storage::Relation;

/// Registered relation: its name and normalized column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub name: String,
    pub columns: Vec<String>,
}

impl SchemaEntry {
    /// Render as `name(col1, col2, ...)`
    pub fn describe(&self) -> String {
        format!("{}({})", self.name, self.columns.join(", "))
    }
}

/// Registry of all relations known to one session
///
/// Entries keep their first-registration order. Registering a relation whose
/// name is already known replaces that entry in place; there is no removal.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    entries: Vec<SchemaEntry>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for a relation
    ///
    /// # Returns
    /// * `true` if an existing entry was replaced, `false` if one was added
    pub fn register(&mut self, relation: &Relation) -> bool {
        let entry = SchemaEntry {
            name: relation.name.clone(),
            columns: relation.column_names(),
        };

        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                *existing = entry;
                log::info!("Replaced schema entry for relation '{}'", relation.name);
                true
            }
            None => {
                self.entries.push(entry);
                log::info!("Registered relation '{}'", relation.name);
                false
            }
        }
    }

    /// Full schema description, one `name(col1, col2, ...)` line per relation
    pub fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}\n", e.describe()))
            .collect()
    }

    /// Names of all registered relations, in registration order
    pub fn relation_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Column names of a registered relation
    pub fn columns(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.columns.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
