// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result narration
//!
//! Turns a query result into a short business summary by sending a bounded
//! plain-text preview to the model. Empty results never reach the model.

use crate::exec::QueryResult;
use crate::llm::prompt::narration_prompt;
use crate::llm::{CompletionClient, CompletionRequest, ModelError};
use std::sync::Arc;

/// Number of result rows included in the narration preview
pub const PREVIEW_ROWS: usize = 10;

/// Returned for empty results without calling the model
pub const NO_DATA_MESSAGE: &str = "No data was returned for this question.";

/// Produces narrative summaries of query results
pub struct Narrator {
    client: Arc<dyn CompletionClient>,
}

impl Narrator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Summarize `result` in two or three sentences
    ///
    /// An empty result (including a failed execution) yields
    /// [`NO_DATA_MESSAGE`] and makes no model call. Model failures are
    /// returned as errors, never as a blank summary.
    pub fn narrate(&self, result: &QueryResult) -> Result<String, ModelError> {
        if result.is_empty() {
            log::debug!("Empty result, skipping narration call");
            return Ok(NO_DATA_MESSAGE.to_string());
        }

        let preview = result.to_plain_text(PREVIEW_ROWS);
        let request = CompletionRequest::new(narration_prompt(&preview));
        let summary = self.client.complete(&request)?;
        Ok(summary.trim().to_string())
    }
}
