// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error type returned by the coordinator

use crate::config::ConfigError;
use crate::ingest::IngestError;
use crate::llm::ModelError;
use crate::storage::StoreError;
use crate::synth::SynthesisError;
use thiserror::Error;

/// Failures surfaced by [`crate::InsightCoordinator`]
///
/// Execution failures are not represented here. A statement that cannot run
/// produces an empty [`crate::QueryResult`] with a diagnostic instead.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ingestion error: {0}")]
    Ingestion(#[from] IngestError),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Narration error: {0}")]
    Narration(ModelError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("No data loaded yet; load at least one CSV file before asking a question")]
    NoRelations,
}

pub type InsightResult<T> = Result<T, InsightError>;
