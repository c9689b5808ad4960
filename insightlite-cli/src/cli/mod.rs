// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for InsightLite
//!
//! Provides one-shot questions, an interactive console (REPL) and schema
//! inspection over CSV files.

pub mod chart;
pub mod commands;
pub mod handlers;
pub mod output;
pub mod repl;

pub use commands::{Cli, Commands};
pub use handlers::{handle_ask, handle_schema, AskArgs};
pub use repl::handle_repl;
