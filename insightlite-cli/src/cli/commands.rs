// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use insightlite::ChartKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "insightlite")]
#[command(about = "Ask questions about CSV files in plain language", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,

    /// JSON file with model settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model identifier
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Model request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Extra attempts for transient model failures
    #[arg(long, global = true)]
    pub retries: Option<u32>,
}

impl Cli {
    /// Model settings given on the command line
    pub fn model_options(&self) -> ModelOptions {
        ModelOptions {
            config: self.config.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            retries: self.retries,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer one question and exit
    Ask {
        /// The question, in plain language
        question: String,

        /// CSV file to load (repeatable)
        #[arg(short = 'f', long = "file", required = true)]
        files: Vec<PathBuf>,

        /// Output format for the result
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Draw a chart of the result
        #[arg(long, value_enum)]
        chart: Option<ChartArg>,

        /// Write the result to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Skip the narrative summary
        #[arg(long, default_value_t = false)]
        no_summary: bool,
    },

    /// Start the interactive console
    Repl {
        /// CSV file to load at startup (repeatable)
        #[arg(short = 'f', long = "file")]
        files: Vec<PathBuf>,
    },

    /// Load files and print the schema description
    Schema {
        /// CSV file to load (repeatable)
        #[arg(short = 'f', long = "file", required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

/// Model settings taken from global flags
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    pub config: Option<PathBuf>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub retries: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartArg {
    Bar,
    Line,
    Pie,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Bar => ChartKind::Bar,
            ChartArg::Line => ChartKind::Line,
            ChartArg::Pie => ChartKind::Pie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "insightlite",
            "--retries",
            "2",
            "ask",
            "-f",
            "sales.csv",
            "--file",
            "more.csv",
            "total revenue",
            "--format",
            "json",
            "--chart",
            "pie",
            "--no-summary",
        ])
        .unwrap();

        assert_eq!(cli.model_options().retries, Some(2));
        match cli.command {
            Commands::Ask {
                question,
                files,
                format,
                chart,
                no_summary,
                ..
            } => {
                assert_eq!(question, "total revenue");
                assert_eq!(files.len(), 2);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(chart.map(ChartKind::from), Some(ChartKind::Pie));
                assert!(no_summary);
            }
            _ => panic!("Expected the ask command"),
        }
    }

    #[test]
    fn test_ask_requires_a_file() {
        assert!(Cli::try_parse_from(["insightlite", "ask", "question"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["insightlite", "repl", "-v", "--log-level", "info"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_level, Some(log::Level::Info));
    }
}
