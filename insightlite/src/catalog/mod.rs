// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema catalog for a session's relations

pub mod registry;

pub use registry::SchemaRegistry;
