// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for InsightLite

use colored::Colorize;
use insightlite::{
    load_csv, ChartKind, ChartPlan, ConfigError, InsightCoordinator, ModelConfig, QueryResult,
};
use std::fs::File;
use std::path::{Path, PathBuf};

use super::chart::ChartRenderer;
use super::commands::{ModelOptions, OutputFormat};
use super::output::ResultFormatter;

/// Arguments of the ask command
pub struct AskArgs {
    pub question: String,
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub chart: Option<ChartKind>,
    pub export: Option<PathBuf>,
    pub summary: bool,
}

/// Resolve model settings: config file or environment, then command-line flags
///
/// Fails when the API key is missing so the problem shows up before any
/// file is loaded.
pub fn load_config(options: &ModelOptions) -> Result<ModelConfig, ConfigError> {
    let mut config = match &options.config {
        Some(path) => ModelConfig::from_file(path)?,
        None => ModelConfig::from_env()?,
    };

    if let Some(model) = &options.model {
        config.model = model.clone();
    }
    if let Some(base_url) = &options.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = options.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(retries) = options.retries {
        config.retry.max_attempts = retries.saturating_add(1);
    }

    config.validate()?;
    log::debug!("Model settings: {:?}", config);
    Ok(config)
}

/// Build a coordinator from the resolved settings
pub fn connect(options: &ModelOptions) -> Result<InsightCoordinator, Box<dyn std::error::Error>> {
    let config = load_config(options)?;
    Ok(InsightCoordinator::from_config(&config)?)
}

/// Handle the ask command (one question, then exit)
pub fn handle_ask(
    options: &ModelOptions,
    args: AskArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = connect(options)?;
    let session_id = coordinator.create_session()?;

    let outcomes = coordinator.load_files(&session_id, &args.files)?;
    eprint!("{}", ResultFormatter::format_load_outcomes(&outcomes));
    if !outcomes.iter().any(|o| o.is_ok()) {
        return Err("None of the given files could be loaded".into());
    }

    let (statement, result, narrative) = if args.summary {
        let answer = coordinator.ask(&session_id, &args.question)?;
        println!("{}", ResultFormatter::format_answer(&answer, args.format));
        (answer.statement, answer.result, Some(answer.narrative))
    } else {
        let statement = coordinator.synthesize(&session_id, &args.question)?;
        let result = coordinator.execute(&session_id, &statement)?;
        (statement, result, None)
    };

    if !args.summary {
        match args.format {
            OutputFormat::Table => println!(
                "{} {}\n\n{}",
                "SQL:".bold().cyan(),
                statement,
                ResultFormatter::format(&result, args.format)
            ),
            _ => println!("{}", ResultFormatter::format(&result, args.format)),
        }
    }

    if args.format == OutputFormat::Table {
        if let Some(kind) = args.chart {
            println!(
                "{}",
                ChartRenderer::render(&ChartPlan::from_result(&result), kind)
            );
        }
        if let Some(narrative) = &narrative {
            println!("{}", ResultFormatter::format_narrative(narrative));
        }
    }

    if let Some(path) = &args.export {
        export_result(&result, path)?;
    }

    Ok(())
}

/// Write a result to a CSV file
pub fn export_result(result: &QueryResult, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if result.is_failure() {
        return Err("The last question produced no result to export".into());
    }
    let file = File::create(path)?;
    result.write_csv(file)?;
    eprintln!(
        "{}",
        format!("Exported {} rows to {}", result.row_count(), path.display()).green()
    );
    Ok(())
}

/// Handle the schema command (no model access needed)
pub fn handle_schema(
    files: Vec<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut relations = Vec::new();
    for path in &files {
        match load_csv(path) {
            Ok(relation) => {
                // Later files replace earlier files of the same derived name
                relations.retain(|r: &insightlite::Relation| r.name != relation.name);
                relations.push(relation);
            }
            Err(e) => eprintln!("{}", format!("Skipped: {}", e).red()),
        }
    }

    if relations.is_empty() {
        return Err("None of the given files could be loaded".into());
    }

    println!("{}", ResultFormatter::format_relations(&relations, format));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insightlite::{ColumnType, Row, Value};

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"api_key": "from-file", "model": "file-model", "timeout_secs": 5}"#,
        )
        .unwrap();

        let options = ModelOptions {
            config: Some(path),
            model: Some("flag-model".into()),
            timeout: Some(12),
            retries: Some(2),
            ..ModelOptions::default()
        };
        let config = load_config(&options).unwrap();
        assert_eq!(config.model, "flag-model");
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_export_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let result = QueryResult::new(
            vec!["product".into(), "units".into()],
            vec![ColumnType::Text, ColumnType::Integer],
            vec![Row::new(vec![Value::from("Kiwi"), Value::Integer(7)])],
        );

        export_result(&result, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "product,units\nKiwi,7\n"
        );
        assert!(export_result(&QueryResult::failed("SQL Error: x"), &path).is_err());
    }
}
