// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Completion client trait
//!
//! This module defines the seam between InsightLite and the hosted language
//! model. The synthesizer and narrator only ever talk to a
//! [`CompletionClient`], so tests can substitute a scripted implementation.

use thiserror::Error;

/// System instruction sent with every completion request
pub const SYSTEM_PROMPT: &str = "You are a SQL and business analytics expert.";

/// Errors from the model service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Model request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Cannot reach model service: {0}")]
    Connection(String),

    #[error("Model service rate limit reached")]
    RateLimited,

    #[error("Model service rejected the API key (HTTP {0})")]
    Unauthorized(u16),

    #[error("Model service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unreadable model response: {0}")]
    InvalidResponse(String),

    #[error("Model returned an empty completion")]
    EmptyCompletion,
}

impl ModelError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ModelError::Timeout(_) | ModelError::Connection(_) | ModelError::RateLimited => true,
            ModelError::Api { status, .. } => *status >= 500,
            ModelError::Unauthorized(_)
            | ModelError::InvalidResponse(_)
            | ModelError::EmptyCompletion => false,
        }
    }
}

/// A single chat-style completion request: one system and one user message
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
}

impl CompletionRequest {
    /// Request with the standard analytics-expert system message
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            prompt: prompt.into(),
        }
    }
}

/// Trait for anything that can answer a completion request
///
/// Implementations block until the completion is available or the call fails.
/// The returned text is the trimmed content of the single completion.
pub trait CompletionClient: Send + Sync {
    /// Send one request and return the completion text
    fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError>;
}

impl<C: CompletionClient + ?Sized> CompletionClient for std::sync::Arc<C> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        (**self).complete(request)
    }
}

impl<C: CompletionClient + ?Sized> CompletionClient for Box<C> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        (**self).complete(request)
    }
}
