// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Interactive console for asking questions

use colored::Colorize;
use insightlite::{ChartKind, ChartPlan, InsightCoordinator};
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::path::{Path, PathBuf};

use super::chart::ChartRenderer;
use super::commands::{ModelOptions, OutputFormat};
use super::handlers::{connect, export_result};
use super::output::ResultFormatter;

const HISTORY_PATH: &str = ".insightlite/history.txt";

/// A console line, once parsed
#[derive(Debug, PartialEq)]
enum ReplCommand<'a> {
    Exit,
    Help,
    Clear,
    Load(&'a str),
    Schema,
    Chart(Option<&'a str>),
    Export(&'a str),
    Question(&'a str),
    Empty,
    Unknown(&'a str),
}

impl<'a> ReplCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => return ReplCommand::Empty,
            "exit" | "quit" => return ReplCommand::Exit,
            "help" => return ReplCommand::Help,
            "clear" => return ReplCommand::Clear,
            _ => {}
        }

        let Some(meta) = trimmed.strip_prefix('\\') else {
            return ReplCommand::Question(trimmed);
        };
        let (name, arg) = match meta.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (meta, ""),
        };
        match (name, arg) {
            ("load", "") | ("export", "") => ReplCommand::Unknown(trimmed),
            ("load", path) => ReplCommand::Load(path),
            ("schema", _) => ReplCommand::Schema,
            ("chart", "") => ReplCommand::Chart(None),
            ("chart", kind) => ReplCommand::Chart(Some(kind)),
            ("export", path) => ReplCommand::Export(path),
            _ => ReplCommand::Unknown(trimmed),
        }
    }
}

/// Handle the repl command
pub fn handle_repl(
    options: &ModelOptions,
    files: Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = connect(options)?;
    let session_id = coordinator.create_session()?;

    if !files.is_empty() {
        let outcomes = coordinator.load_files(&session_id, &files)?;
        print!("{}", ResultFormatter::format_load_outcomes(&outcomes));
    }

    println!("{}", "InsightLite".bold().green());
    println!("Ask a question in plain language, or type 'help' for commands");
    println!("Type 'exit' or 'quit' to exit\n");

    let config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<(), _>::with_config(config)?;

    if let Some(parent) = Path::new(HISTORY_PATH).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.load_history(HISTORY_PATH);

    let mut chart_kind = ChartKind::default();

    loop {
        let line = match rl.readline(&format!("{}> ", "insight".cyan())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let command = ReplCommand::parse(&line);
        if !matches!(command, ReplCommand::Empty) {
            rl.add_history_entry(line.trim())?;
        }

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Exit => {
                println!("{}", "Goodbye!".green());
                break;
            }
            ReplCommand::Help => print_help(),
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                std::io::Write::flush(&mut std::io::stdout())?;
            }
            ReplCommand::Load(path) => {
                let outcomes = coordinator.load_files(&session_id, &[PathBuf::from(path)])?;
                print!("{}", ResultFormatter::format_load_outcomes(&outcomes));
            }
            ReplCommand::Schema => print_schema(&coordinator, &session_id)?,
            ReplCommand::Chart(kind) => {
                if let Some(kind) = kind {
                    match kind.parse::<ChartKind>() {
                        Ok(parsed) => chart_kind = parsed,
                        Err(e) => {
                            eprintln!("{}", e.red());
                            continue;
                        }
                    }
                }
                match coordinator.last_result(&session_id)? {
                    Some(result) => println!(
                        "{}",
                        ChartRenderer::render(&ChartPlan::from_result(&result), chart_kind)
                    ),
                    None => println!("{}", "Ask a question first".yellow()),
                }
            }
            ReplCommand::Export(path) => match coordinator.last_result(&session_id)? {
                Some(result) => {
                    if let Err(e) = export_result(&result, Path::new(path)) {
                        eprintln!("{}", format!("Export failed: {}", e).red());
                    }
                }
                None => println!("{}", "Ask a question first".yellow()),
            },
            ReplCommand::Question(question) => ask(&coordinator, &session_id, question, chart_kind),
            ReplCommand::Unknown(text) => {
                eprintln!(
                    "{}",
                    format!("Unknown command '{}'. Type 'help' for commands.", text).yellow()
                );
            }
        }
    }

    let _ = rl.save_history(HISTORY_PATH);

    Ok(())
}

/// Answer one question and print everything produced for it
fn ask(coordinator: &InsightCoordinator, session_id: &str, question: &str, chart_kind: ChartKind) {
    match coordinator.ask(session_id, question) {
        Ok(answer) => {
            println!("{}", ResultFormatter::format_answer(&answer, OutputFormat::Table));
            println!("{}", ChartRenderer::render(&answer.chart(), chart_kind));
            println!("{}", ResultFormatter::format_narrative(&answer.narrative));
        }
        Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
    }
}

fn print_schema(
    coordinator: &InsightCoordinator,
    session_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = coordinator.schema(session_id)?;
    if schema.is_empty() {
        println!("{}", "No files loaded. Use \\load <path>".yellow());
    } else {
        print!("{}", schema);
    }
    Ok(())
}

/// Print help message
fn print_help() {
    println!("{}", "Available commands:".bold().green());
    println!("  {}  - Load a CSV file", "\\load <path>".cyan());
    println!("  {}  - Show loaded tables and columns", "\\schema".cyan());
    println!(
        "  {}  - Chart the last result (bar, line or pie)",
        "\\chart [kind]".cyan()
    );
    println!("  {}  - Save the last result as CSV", "\\export <path>".cyan());
    println!("  {}  - Show this help message", "help".cyan());
    println!("  {}  - Clear the screen", "clear".cyan());
    println!("  {}  - Exit the console", "exit/quit".cyan());
    println!("\n{}", "Questions:".bold().green());
    println!("  Any other line is answered as a question about the loaded data");
    println!("\n{}", "Examples:".bold().green());
    println!("  {}", "what is total revenue by product".yellow());
    println!("  {}", "which month had the most orders".yellow());
}
