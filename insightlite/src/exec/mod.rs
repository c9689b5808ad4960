// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement execution and result types

pub mod executor;
pub mod result;

pub use executor::{QueryExecutor, SQL_ERROR_PREFIX};
pub use result::{QueryResult, Row};
