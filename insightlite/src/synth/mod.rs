// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Question to statement synthesis
//!
//! - [`statement`] - code-fence stripping and first-statement extraction
//! - [`synthesizer`] - builds the prompt and asks the model for one statement

pub mod statement;
pub mod synthesizer;

pub use statement::{extract_statement, first_statement, strip_code_fences};
pub use synthesizer::{QuerySynthesizer, SynthesisError};
