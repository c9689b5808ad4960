// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Insight Coordinator - orchestration of the question answering pipeline
//!
//! Wraps the session manager and drives one question through synthesis,
//! execution and narration against the session's own store.

use crate::chart::ChartPlan;
use crate::config::ModelConfig;
use crate::error::{InsightError, InsightResult};
use crate::exec::QueryResult;
use crate::ingest::{load_csv, load_reader, LoadOutcome, LoadedRelation};
use crate::llm::{ChatCompletionClient, CompletionClient, ModelError, RetryingClient};
use crate::narrate::Narrator;
use crate::session::{SessionHandle, SessionManager, Stage};
use crate::synth::QuerySynthesizer;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Everything produced for one question
#[derive(Debug, Clone)]
pub struct Answer {
    pub question: String,
    /// The single statement that was executed
    pub statement: String,
    /// Rows returned, or an empty result carrying a diagnostic
    pub result: QueryResult,
    /// Summary text, or the model failure that prevented it
    pub narrative: Result<String, ModelError>,
}

impl Answer {
    /// Execution diagnostic, when the statement failed to run
    pub fn diagnostic(&self) -> Option<&str> {
        self.result.error.as_deref()
    }

    pub fn chart(&self) -> ChartPlan {
        ChartPlan::from_result(&self.result)
    }
}

/// Insight Coordinator - entry point for loading data and asking questions
///
/// Every operation names a session. Sessions never share a store, so
/// relations loaded in one session are invisible to every other session.
pub struct InsightCoordinator {
    session_manager: SessionManager,
    synthesizer: QuerySynthesizer,
    narrator: Narrator,
}

impl InsightCoordinator {
    /// Create a coordinator talking to the configured model service
    ///
    /// Fails immediately when the API key is missing or the configuration is
    /// otherwise invalid, before any file is loaded.
    pub fn from_config(config: &ModelConfig) -> InsightResult<Self> {
        let client = ChatCompletionClient::from_config(config)?;
        log::info!("Using model '{}'", client.model());
        let client = RetryingClient::new(client, config.retry);
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create a coordinator around any completion client
    pub fn with_client(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            session_manager: SessionManager::new(),
            synthesizer: QuerySynthesizer::new(client.clone()),
            narrator: Narrator::new(client),
        }
    }

    /// Create a new session with an empty store and return its ID
    pub fn create_session(&self) -> InsightResult<String> {
        Ok(self.session_manager.create_session()?)
    }

    /// Close a session and release its store
    pub fn close_session(&self, session_id: &str) -> bool {
        self.session_manager.remove_session(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.session_manager.session_count()
    }

    /// IDs of all open sessions
    pub fn session_ids(&self) -> Vec<String> {
        self.session_manager.get_active_session_ids()
    }

    fn session(&self, session_id: &str) -> InsightResult<SessionHandle> {
        self.session_manager
            .get_session(session_id)
            .ok_or_else(|| InsightError::SessionNotFound(session_id.to_string()))
    }

    /// Load CSV files into a session
    ///
    /// Each file is loaded on its own: a failing file is reported in its
    /// outcome and the remaining files still load.
    pub fn load_files<P: AsRef<Path>>(
        &self,
        session_id: &str,
        paths: &[P],
    ) -> InsightResult<Vec<LoadOutcome>> {
        let handle = self.session(session_id)?;
        let mut session = handle.lock();

        let outcomes = paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                let file = path.display().to_string();
                let result = load_csv(path)
                    .and_then(|relation| session.load_relation(&file, &relation));
                if let Err(e) = &result {
                    log::warn!("Failed to load '{}': {}", file, e);
                }
                LoadOutcome { file, result }
            })
            .collect();

        Ok(outcomes)
    }

    /// Load CSV content from a reader, naming the relation after `file_name`
    pub fn load_reader<R: Read>(
        &self,
        session_id: &str,
        file_name: &str,
        reader: R,
    ) -> InsightResult<LoadedRelation> {
        let handle = self.session(session_id)?;
        let relation = load_reader(file_name, reader)?;
        let loaded = handle.lock().load_relation(file_name, &relation)?;
        Ok(loaded)
    }

    /// Current schema description of a session
    pub fn schema(&self, session_id: &str) -> InsightResult<String> {
        Ok(self.session(session_id)?.lock().schema())
    }

    /// Names of the relations loaded into a session
    pub fn relation_names(&self, session_id: &str) -> InsightResult<Vec<String>> {
        Ok(self.session(session_id)?.lock().registry().relation_names())
    }

    pub fn stage(&self, session_id: &str) -> InsightResult<Stage> {
        Ok(self.session(session_id)?.lock().stage())
    }

    /// Result of the session's most recent question
    pub fn last_result(&self, session_id: &str) -> InsightResult<Option<QueryResult>> {
        Ok(self.session(session_id)?.lock().last_result().cloned())
    }

    /// Turn a question into one statement over the session's schema
    pub fn synthesize(&self, session_id: &str, question: &str) -> InsightResult<String> {
        let schema = self.session(session_id)?.lock().schema();
        if schema.is_empty() {
            return Err(InsightError::NoRelations);
        }
        Ok(self.synthesizer.synthesize(question, &schema)?)
    }

    /// Run a statement against the session's store
    ///
    /// Never fails for a bad statement; see [`QueryResult::is_failure`].
    pub fn execute(&self, session_id: &str, statement: &str) -> InsightResult<QueryResult> {
        Ok(self.session(session_id)?.lock().execute(statement))
    }

    /// Summarize a result
    pub fn narrate(&self, result: &QueryResult) -> InsightResult<String> {
        self.narrator.narrate(result).map_err(InsightError::Narration)
    }

    /// Answer a question end to end
    ///
    /// Synthesis failures are returned as errors. Execution failures become
    /// an empty result with a diagnostic. Narration failures are kept in
    /// [`Answer::narrative`] so the result is never lost.
    pub fn ask(&self, session_id: &str, question: &str) -> InsightResult<Answer> {
        let handle = self.session(session_id)?;
        let mut session = handle.lock();

        if !session.has_relations() {
            return Err(InsightError::NoRelations);
        }

        session.advance(Stage::Synthesizing);
        let statement = match self.synthesizer.synthesize(question, &session.schema()) {
            Ok(statement) => statement,
            Err(e) => {
                session.advance(Stage::Failed);
                log::warn!("Synthesis failed for question '{}': {}", question, e);
                return Err(e.into());
            }
        };
        session.advance(Stage::Synthesized);

        session.advance(Stage::Executing);
        let result = session.execute(&statement);
        session.advance(if result.is_empty() {
            Stage::EmptyResult
        } else {
            Stage::ResultReady
        });
        session.remember(&result);

        session.advance(Stage::Narrating);
        let narrative = self.narrator.narrate(&result);
        match &narrative {
            Ok(_) => session.advance(Stage::Done),
            Err(e) => {
                log::warn!("Narration failed: {}", e);
                session.advance(Stage::Failed);
            }
        }

        Ok(Answer {
            question: question.to_string(),
            statement,
            result,
            narrative,
        })
    }
}
