// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Hosted language model integration
//!
//! - [`client`] - the `CompletionClient` seam and model errors
//! - [`chat`] - HTTP client for OpenAI-compatible chat completions
//! - [`retry`] - optional bounded retry for transient failures
//! - [`prompt`] - synthesis and narration prompt templates

pub mod chat;
pub mod client;
pub mod prompt;
pub mod retry;

pub use chat::ChatCompletionClient;
pub use client::{CompletionClient, CompletionRequest, ModelError, SYSTEM_PROMPT};
pub use retry::RetryingClient;
