// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement synthesis via the completion client

use super::statement::extract_statement;
use crate::llm::prompt::synthesis_prompt;
use crate::llm::{CompletionClient, CompletionRequest, ModelError};
use std::sync::Arc;
use thiserror::Error;

/// Reasons a question could not be turned into a statement
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("No relations are loaded; load at least one file before asking")]
    EmptySchema,

    #[error("Model call failed: {0}")]
    Model(#[from] ModelError),

    #[error("Model response contained no usable statement: {0:?}")]
    Unusable(String),
}

/// Turns a natural-language question plus a schema description into one
/// SQLite statement
pub struct QuerySynthesizer {
    client: Arc<dyn CompletionClient>,
}

impl QuerySynthesizer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Ask the model for a statement answering `question` over `schema`
    ///
    /// The returned text has fences removed, holds exactly one statement and
    /// ends with a single `;`. It is not validated against the schema.
    pub fn synthesize(&self, question: &str, schema: &str) -> Result<String, SynthesisError> {
        if question.trim().is_empty() {
            return Err(SynthesisError::EmptyQuestion);
        }
        if schema.trim().is_empty() {
            return Err(SynthesisError::EmptySchema);
        }

        let request = CompletionRequest::new(synthesis_prompt(schema, question));
        let raw = self.client.complete(&request)?;
        log::debug!("Raw synthesis response: {}", raw);

        match extract_statement(&raw) {
            Some(statement) => {
                log::info!("Synthesized statement: {}", statement);
                Ok(statement)
            }
            None => {
                log::warn!("Model response held no statement");
                Err(SynthesisError::Unusable(raw))
            }
        }
    }
}
