//! Test utilities for InsightLite integration tests
//!
//! - ScriptedModel: replays canned completions and records every request
//! - TestFixture: coordinator, session and a temporary directory for CSV files

#![allow(dead_code)]

pub mod scripted_model;
pub mod test_fixture;
