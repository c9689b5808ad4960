//! Scripted stand-in for the hosted model
//!
//! Responses are replayed in order. Every request is recorded so tests can
//! assert on prompts and on how many calls were made.

use insightlite::{CompletionClient, CompletionRequest, ModelError};
use parking_lot::Mutex;
use std::collections::VecDeque;

#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion
    pub fn reply(&self, text: impl Into<String>) -> &Self {
        self.responses.lock().push_back(Ok(text.into()));
        self
    }

    /// Queue a failed completion
    pub fn fail(&self, error: ModelError) -> &Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    /// User prompt of the n-th request
    pub fn prompt(&self, index: usize) -> Option<String> {
        self.requests.lock().get(index).map(|r| r.prompt.clone())
    }
}

impl CompletionClient for ScriptedModel {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::InvalidResponse("script exhausted".to_string())))
    }
}
