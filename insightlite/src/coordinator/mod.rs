// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Insight Coordinator - Central orchestration for question answering
//!
//! The InsightCoordinator provides a unified entry point that coordinates
//! sessions, ingestion, synthesis, execution and narration.

pub mod insight_coordinator;

pub use insight_coordinator::{Answer, InsightCoordinator};

// Re-export types needed for the public API
pub use crate::exec::{QueryResult, Row};
