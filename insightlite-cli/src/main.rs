// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! InsightLite CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    // Determine log level from CLI args or environment variable
    let log_level = if cli.verbose {
        // -v/--verbose flag takes precedence
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        // --log-level flag
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let options = cli.model_options();

    // Handle commands
    let outcome = match cli.command {
        Commands::Version => {
            println!("{} {}", "InsightLite".bold().green(), insightlite::VERSION);
            println!("Plain-language questions over CSV files");
            Ok(())
        }

        Commands::Ask {
            question,
            files,
            format,
            chart,
            export,
            no_summary,
        } => cli::handle_ask(
            &options,
            cli::AskArgs {
                question,
                files,
                format,
                chart: chart.map(Into::into),
                export,
                summary: !no_summary,
            },
        ),

        Commands::Repl { files } => cli::handle_repl(&options, files),

        Commands::Schema { files, format } => cli::handle_schema(files, format),
    };

    if let Err(e) = outcome {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}
