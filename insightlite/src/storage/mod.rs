// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tabular storage for uploaded relations
//!
//! This module provides:
//! - Value type system for relation cells and result columns
//! - Relation definitions built by ingestion
//! - The session-scoped in-memory store that executes statements

pub mod store;
pub mod types;
pub mod value;

pub use store::TabularStore;
pub use types::{Column, Relation, StoreError, StoreResult};
pub use value::{ColumnType, Value};
