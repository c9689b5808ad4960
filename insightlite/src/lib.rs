// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! InsightLite - Ask questions about CSV files in plain language
//!
//! InsightLite loads delimited files into a per-session in-memory SQLite
//! store, asks a hosted language model to translate a question into one
//! SQLite statement, runs it, and asks the model again for a short business
//! summary of the result.
//!
//! # Features
//!
//! - **Typed ingestion**: header-first CSV files become typed relations
//! - **One statement per question**: model output is cut at the first real
//!   statement boundary, never at a `;` inside a literal or comment
//! - **Read-only execution**: statements that would modify data are rejected
//! - **Session isolation**: every session owns its own store
//! - **Substitutable model**: any [`CompletionClient`] can drive the pipeline
//!
//! # Usage
//!
//! ```bash
//! export GROQ_API_KEY=...
//! insightlite ask -f sales.csv "what is total revenue by product"
//! insightlite repl -f sales.csv -f customers.csv
//! ```

// Public modules - exposed to external users
pub mod coordinator;

// Internal modules - only visible within insightlite crate
pub(crate) mod catalog;
pub(crate) mod chart;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod exec;
pub(crate) mod ingest;
pub(crate) mod llm;
pub(crate) mod narrate;
pub(crate) mod session;
pub(crate) mod storage;
pub(crate) mod synth;

// Re-export the public API - InsightCoordinator is the main entry point
pub use coordinator::{Answer, InsightCoordinator, QueryResult, Row};

pub use catalog::SchemaRegistry;
pub use chart::{ChartData, ChartKind, ChartPlan, NOT_ENOUGH_DATA_MESSAGE};
pub use config::{
    ConfigError, ModelConfig, RetrySettings, API_KEY_ENV, BASE_URL_ENV, MODEL_ENV, TIMEOUT_ENV,
};
pub use error::{InsightError, InsightResult};
pub use exec::SQL_ERROR_PREFIX;
pub use ingest::{load_csv, load_reader, IngestError, LoadOutcome, LoadedRelation};
pub use llm::{
    ChatCompletionClient, CompletionClient, CompletionRequest, ModelError, RetryingClient,
    SYSTEM_PROMPT,
};
pub use narrate::{NO_DATA_MESSAGE, PREVIEW_ROWS};
pub use session::Stage;
pub use storage::{Column, ColumnType, Relation, StoreError, TabularStore, Value};
pub use synth::{extract_statement, SynthesisError};

/// InsightLite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// InsightLite crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
