// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Analysis session state
//!
//! A session owns its own in-memory store and schema registry. Nothing in a
//! session is shared with any other session.

use super::stage::Stage;
use crate::catalog::SchemaRegistry;
use crate::exec::{QueryExecutor, QueryResult};
use crate::ingest::{IngestError, LoadedRelation};
use crate::storage::{Relation, StoreResult, TabularStore};
use chrono::{DateTime, Utc};

/// One user's analysis session
pub struct Session {
    /// Unique session identifier
    pub session_id: String,
    store: TabularStore,
    registry: SchemaRegistry,
    stage: Stage,
    /// Result of the most recent question
    last_result: Option<QueryResult>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Create a session with a fresh, empty store
    pub fn new() -> StoreResult<Self> {
        let now = Utc::now();
        Ok(Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            store: TabularStore::open_in_memory()?,
            registry: SchemaRegistry::new(),
            stage: Stage::Idle,
            last_result: None,
            created_at: now,
            last_activity: now,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Move to the next pipeline stage
    pub(crate) fn advance(&mut self, next: Stage) {
        if !self.stage.can_transition_to(next) {
            log::warn!(
                "Session {} jumped from '{}' to '{}'",
                self.session_id,
                self.stage,
                next
            );
        }
        self.stage = next;
        self.last_activity = Utc::now();
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Current schema description
    pub fn schema(&self) -> String {
        self.registry.describe()
    }

    pub fn has_relations(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Store a relation and register it, replacing any relation of the same name
    ///
    /// The session is ready for a new question afterwards, whatever happened
    /// to the previous one.
    ///
    /// The registry is only updated after the store accepted the relation, so
    /// the schema description never names a table that is missing.
    pub fn load_relation(
        &mut self,
        file: &str,
        relation: &Relation,
    ) -> Result<LoadedRelation, IngestError> {
        self.store
            .replace_relation(relation)
            .map_err(|source| IngestError::Store {
                relation: relation.name.clone(),
                source,
            })?;
        self.registry.register(relation);
        self.advance(Stage::SchemaReady);

        log::info!(
            "Loaded '{}' as relation '{}' ({} columns, {} rows)",
            file,
            relation.name,
            relation.columns.len(),
            relation.row_count()
        );

        Ok(LoadedRelation {
            file: file.to_string(),
            table: relation.name.clone(),
            columns: relation.column_names(),
            rows: relation.row_count(),
        })
    }

    /// Run a statement against this session's store
    pub fn execute(&self, statement: &str) -> QueryResult {
        QueryExecutor::new(&self.store).execute(statement)
    }

    pub(crate) fn remember(&mut self, result: &QueryResult) {
        self.last_result = Some(result.clone());
    }

    /// Result of the most recent question, used for charts and export
    pub fn last_result(&self) -> Option<&QueryResult> {
        self.last_result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Column, ColumnType, Value};

    fn relation(name: &str, rows: Vec<i64>) -> Relation {
        Relation::new(
            name,
            vec![Column::new("n", ColumnType::Integer)],
            rows.into_iter().map(|n| vec![Value::Integer(n)]).collect(),
        )
    }

    #[test]
    fn test_load_moves_to_schema_ready() {
        let mut session = Session::new().unwrap();
        assert_eq!(session.stage(), Stage::Idle);
        assert!(!session.has_relations());

        let loaded = session.load_relation("t.csv", &relation("t", vec![1, 2])).unwrap();
        assert_eq!(loaded.table, "t");
        assert_eq!(loaded.rows, 2);
        assert_eq!(session.stage(), Stage::SchemaReady);
        assert_eq!(session.schema(), "t(n)\n");
    }

    #[test]
    fn test_load_after_failed_question_is_schema_ready() {
        let mut session = Session::new().unwrap();
        session.load_relation("t.csv", &relation("t", vec![1])).unwrap();
        session.advance(Stage::Synthesizing);
        session.advance(Stage::Failed);
        assert_eq!(session.stage(), Stage::Failed);

        session.load_relation("u.csv", &relation("u", vec![2])).unwrap();
        assert_eq!(session.stage(), Stage::SchemaReady);

        session.advance(Stage::Synthesizing);
        session.advance(Stage::Synthesized);
        session.advance(Stage::Executing);
        session.advance(Stage::ResultReady);
        session.advance(Stage::Narrating);
        session.advance(Stage::Done);
        session.load_relation("t.csv", &relation("t", vec![3])).unwrap();
        assert_eq!(session.stage(), Stage::SchemaReady);
    }

    #[test]
    fn test_reload_replaces_rows() {
        let mut session = Session::new().unwrap();
        session.load_relation("t.csv", &relation("t", vec![1, 2, 3])).unwrap();
        session.load_relation("t.csv", &relation("t", vec![9])).unwrap();

        let result = session.execute("SELECT n FROM t;");
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.value(0, "n"), Some(&Value::Integer(9)));
        assert_eq!(session.registry().len(), 1);
    }

    #[test]
    fn test_remember_last_result() {
        let mut session = Session::new().unwrap();
        session.load_relation("t.csv", &relation("t", vec![5])).unwrap();
        let result = session.execute("SELECT n FROM t;");
        session.remember(&result);

        assert_eq!(session.last_result().map(|r| r.row_count()), Some(1));
    }
}
