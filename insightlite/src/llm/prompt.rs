// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Prompt templates for statement synthesis and result narration

/// Prompt asking the model to turn a question into one SQLite statement
///
/// The rules restrict the model to the described tables and columns, require
/// `table.column` qualification, define revenue as quantity * price when no
/// revenue column exists, and forbid prose and multiple statements.
pub fn synthesis_prompt(schema: &str, question: &str) -> String {
    format!(
        "You are a data analyst.

Here is the database schema:
{schema}

Rules:
- Use only these tables and columns
- Use table.column format
- No guessing columns
- If revenue not present, calculate as quantity * price
- Write ONE SQLite query
- No explanation

User question:
{question}
",
        schema = schema.trim_end(),
        question = question.trim()
    )
}

/// Prompt asking the model for a short business summary of a result preview
pub fn narration_prompt(preview: &str) -> String {
    format!(
        "You are a senior business analyst.

Here is a table of results:
{preview}

Write a clear 2-3 sentence business summary.
Do not mention SQL.
Do not repeat the numbers exactly.
Explain what this means for the business.
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_prompt_embeds_schema_and_question() {
        let prompt = synthesis_prompt("sales(date, product)\n", "  total by product? ");
        assert!(prompt.contains("Here is the database schema:\nsales(date, product)\n\nRules:"));
        assert!(prompt.contains("- Use table.column format"));
        assert!(prompt.contains("- If revenue not present, calculate as quantity * price"));
        assert!(prompt.contains("- Write ONE SQLite query"));
        assert!(prompt.ends_with("User question:\ntotal by product?\n"));
    }

    #[test]
    fn test_narration_prompt_embeds_preview() {
        let prompt = narration_prompt("product revenue\n  apple    12.5");
        assert!(prompt.contains("Here is a table of results:\nproduct revenue\n  apple    12.5\n"));
        assert!(prompt.contains("Do not mention SQL."));
        assert!(prompt.contains("Do not repeat the numbers exactly."));
    }
}
