// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session management
//!
//! - Session-scoped store and schema registry (no cross-session sharing)
//! - Per-question pipeline stage tracking
//! - Registry of active sessions keyed by UUID

pub mod manager;
pub mod models;
pub mod stage;

pub use manager::{SessionHandle, SessionManager};
pub use models::Session;
pub use stage::Stage;
