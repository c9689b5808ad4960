// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use insightlite::{Answer, LoadOutcome, QueryResult, Relation, Value};

use super::commands::OutputFormat;

/// Result formatter for different output formats
pub struct ResultFormatter;

impl ResultFormatter {
    /// Format query results in the specified format
    pub fn format(result: &QueryResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(result),
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Csv => Self::format_csv(result),
        }
    }

    /// Format results as a table using comfy-table
    fn format_table(result: &QueryResult) -> String {
        if let Some(error) = &result.error {
            return format!("{}\n", error.red());
        }

        if result.rows.is_empty() {
            return format!("{}\n", "No results found".yellow());
        }

        let mut output = String::new();

        // Header
        output.push_str(&format!("{}\n", "Query Results".bold().green()));
        output.push_str(&format!(
            "Execution time: {} ms\n",
            result.execution_time_ms
        ));
        output.push_str(&format!("Rows returned: {}\n\n", result.rows.len()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);

        let header_cells: Vec<Cell> = result
            .columns
            .iter()
            .map(|col| Cell::new(col).fg(Color::Green))
            .collect();
        table.set_header(header_cells);

        for row in &result.rows {
            let row_values: Vec<String> = row.values.iter().map(|v| v.to_string()).collect();
            table.add_row(row_values);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// JSON representation of a result
    pub fn result_json(result: &QueryResult) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = result
            .rows
            .iter()
            .map(|row| {
                let mut row_map = serde_json::Map::new();
                for (col, value) in result.columns.iter().zip(&row.values) {
                    row_map.insert(col.clone(), Self::value_to_json(value));
                }
                serde_json::Value::Object(row_map)
            })
            .collect();

        let mut json_obj = serde_json::json!({
            "status": if result.is_failure() { "error" } else { "success" },
            "columns": result.columns,
            "rows": rows,
            "row_count": result.rows.len(),
            "execution_time_ms": result.execution_time_ms,
        });

        if let (Some(error), serde_json::Value::Object(map)) = (&result.error, &mut json_obj) {
            map.insert("error".to_string(), serde_json::json!(error));
        }

        json_obj
    }

    /// Format results as JSON
    fn format_json(result: &QueryResult) -> String {
        Self::pretty(&Self::result_json(result))
    }

    /// Format results as CSV
    fn format_csv(result: &QueryResult) -> String {
        let mut out = Vec::new();
        match result.write_csv(&mut out) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(e) => format!("# Could not write CSV: {}\n", e),
        }
    }

    /// Format a whole answer: statement, result, diagnostic and summary
    pub fn format_answer(answer: &Answer, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => {
                let mut output = String::new();
                output.push_str(&format!(
                    "{} {}\n\n",
                    "SQL:".bold().cyan(),
                    answer.statement
                ));
                output.push_str(&Self::format_table(&answer.result));
                output
            }
            OutputFormat::Json => {
                let narrative = match &answer.narrative {
                    Ok(text) => serde_json::json!({ "summary": text }),
                    Err(e) => serde_json::json!({ "error": e.to_string() }),
                };
                Self::pretty(&serde_json::json!({
                    "question": answer.question,
                    "statement": answer.statement,
                    "result": Self::result_json(&answer.result),
                    "narrative": narrative,
                }))
            }
            OutputFormat::Csv => Self::format_csv(&answer.result),
        }
    }

    /// Format the narrative summary, or the reason it is missing
    pub fn format_narrative(narrative: &Result<String, insightlite::ModelError>) -> String {
        match narrative {
            Ok(text) => format!("{}\n{}\n", "Summary".bold().green(), text),
            Err(e) => format!(
                "{}\n",
                format!("Summary unavailable: {}", e).yellow()
            ),
        }
    }

    /// One line per loaded or rejected file
    pub fn format_load_outcomes(outcomes: &[LoadOutcome]) -> String {
        let mut output = String::new();
        for outcome in outcomes {
            match &outcome.result {
                Ok(loaded) => output.push_str(&format!(
                    "{} {} as '{}' ({} rows: {})\n",
                    "Loaded".green(),
                    loaded.file,
                    loaded.table,
                    loaded.rows,
                    loaded.columns.join(", ")
                )),
                Err(e) => output.push_str(&format!("{}\n", format!("Skipped: {}", e).red())),
            }
        }
        output
    }

    /// Describe loaded relations with their column types
    pub fn format_relations(relations: &[Relation], format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_header(vec![
                    Cell::new("relation").fg(Color::Green),
                    Cell::new("columns").fg(Color::Green),
                    Cell::new("rows").fg(Color::Green),
                ]);
                for relation in relations {
                    let columns = relation
                        .columns
                        .iter()
                        .map(|c| format!("{} ({})", c.name, c.column_type))
                        .collect::<Vec<_>>()
                        .join("\n");
                    table.add_row(vec![
                        relation.name.clone(),
                        columns,
                        relation.row_count().to_string(),
                    ]);
                }
                format!("{}\n", table)
            }
            OutputFormat::Json => Self::pretty(&serde_json::json!(relations
                .iter()
                .map(|relation| serde_json::json!({
                    "relation": relation.name,
                    "columns": relation.columns.iter().map(|c| serde_json::json!({
                        "name": c.name,
                        "type": c.column_type.to_string(),
                    })).collect::<Vec<_>>(),
                    "rows": relation.row_count(),
                }))
                .collect::<Vec<_>>())),
            OutputFormat::Csv => {
                let mut output = String::from("relation,column,type\n");
                for relation in relations {
                    for column in &relation.columns {
                        output.push_str(&format!(
                            "{},{},{}\n",
                            relation.name, column.name, column.column_type
                        ));
                    }
                }
                output
            }
        }
    }

    fn pretty(value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize results to JSON\"}".to_string()
        })
    }

    /// Convert a Value to a JSON value
    fn value_to_json(value: &Value) -> serde_json::Value {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Integer(i) => serde_json::json!(i),
            Value::Real(r) => serde_json::json!(r),
            Value::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}
