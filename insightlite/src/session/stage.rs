// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-question pipeline stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a session is in answering its current question
///
/// One question moves through
/// `SchemaReady -> Synthesizing -> Synthesized -> Executing ->
/// {ResultReady | EmptyResult} -> Narrating -> Done`.
/// A failed model call ends in `Failed`. Both terminal stages accept a new
/// question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stage {
    /// No relation loaded yet
    #[default]
    Idle,
    SchemaReady,
    Synthesizing,
    Synthesized,
    Executing,
    ResultReady,
    EmptyResult,
    Narrating,
    Done,
    Failed,
}

impl Stage {
    /// True when a new question may start
    pub fn accepts_question(&self) -> bool {
        matches!(self, Stage::SchemaReady | Stage::Done | Stage::Failed)
    }

    /// Whether moving from `self` to `next` follows the pipeline
    pub fn can_transition_to(&self, next: Stage) -> bool {
        use Stage::*;
        match (self, next) {
            (Idle | SchemaReady | Done | Failed, SchemaReady) => true,
            (from, Synthesizing) => from.accepts_question(),
            (Synthesizing, Synthesized | Failed) => true,
            (Synthesized, Executing) => true,
            (Executing, ResultReady | EmptyResult) => true,
            (ResultReady | EmptyResult, Narrating) => true,
            (Narrating, Done | Failed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::SchemaReady => "schema ready",
            Stage::Synthesizing => "synthesizing",
            Stage::Synthesized => "synthesized",
            Stage::Executing => "executing",
            Stage::ResultReady => "result ready",
            Stage::EmptyResult => "empty result",
            Stage::Narrating => "narrating",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
