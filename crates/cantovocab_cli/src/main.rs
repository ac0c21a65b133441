//! Command-line harness for the vocabulary store.
//!
//! # Responsibility
//! - Open the configured store and run one tool action per invocation.
//! - Print tool results as JSON so scripted runs can inspect them.

use cantovocab_core::db::{close_db, open_db};
use cantovocab_core::{
    init_logging, tool_definitions, AppConfig, ToolError, VocabTools, SYSTEM_PROMPT,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cantovocab", about = "Cantonese vocabulary practice store", version)]
struct Cli {
    /// Store file (overrides CANTOVOCAB_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Due,
    Full,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word with its Jyutping
    Add {
        canonical_key: String,
        translation: String,
    },
    /// Remove the word matching an English key or Jyutping
    Remove { query: String },
    /// List words to practice
    Practice {
        #[arg(long, value_enum, default_value = "due")]
        mode: Mode,
    },
    /// Show up to 50 random words
    Sample,
    /// Show the weakest word, or every word tied at the lowest level
    Weakest {
        #[arg(long)]
        all: bool,
    },
    /// Record practice outcomes
    Progress {
        /// Words answered correctly
        #[arg(long = "correct")]
        correct: Vec<String>,
        /// Words answered incorrectly
        #[arg(long = "wrong")]
        wrong: Vec<String>,
    },
    /// Print every word as `english, jyutping`
    Export,
    /// Invoke a tool by name with a raw JSON argument object
    Call {
        tool: String,
        #[arg(default_value = "{}")]
        args: String,
    },
    /// Print tool definitions as JSON
    Tools,
    /// Print the tutor system prompt
    Prompt,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Tools => return print_json(&json!(tool_definitions())),
        Command::Prompt => {
            println!("{SYSTEM_PROMPT}");
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let db_path = cli.db.unwrap_or(config.db_path);
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("vocabulary store unavailable at {}: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let exit = {
        let mut tools = VocabTools::new(&conn);
        if let Some(today) = cli.today {
            tools = tools.with_fixed_today(today);
        }
        run(&tools, cli.command)
    };

    if let Err(err) = close_db(conn) {
        eprintln!("failed to close store: {err}");
        return ExitCode::FAILURE;
    }
    exit
}

fn run(tools: &VocabTools<'_>, command: Command) -> ExitCode {
    let (name, args) = match command {
        Command::Add {
            canonical_key,
            translation,
        } => (
            "add_word",
            json!({"canonical_key": canonical_key, "translation": translation}),
        ),
        Command::Remove { query } => ("remove_word", json!({ "query_text": query })),
        Command::Practice { mode } => {
            let mode = match mode {
                Mode::Due => "due_review",
                Mode::Full => "full_review",
            };
            ("get_words_for_practice", json!({ "mode": mode }))
        }
        Command::Sample => ("get_random_words", json!({})),
        Command::Weakest { all: false } => ("get_least_proficient_word", json!({})),
        Command::Weakest { all: true } => ("get_lowest_proficiency_words", json!({})),
        Command::Progress { correct, wrong } => {
            let entries: Vec<Value> = correct
                .into_iter()
                .map(|query| json!({"query_text": query, "success": true}))
                .chain(
                    wrong
                        .into_iter()
                        .map(|query| json!({"query_text": query, "success": false})),
                )
                .collect();
            ("update_progress", json!({ "entries": entries }))
        }
        Command::Export => {
            return match tools.invoke("export_words", json!({})) {
                Ok(result) => {
                    if let Some(text) = result["text"].as_str().filter(|text| !text.is_empty()) {
                        println!("{text}");
                    }
                    ExitCode::SUCCESS
                }
                Err(err) => report_failure(&err),
            };
        }
        Command::Call { tool, args } => {
            let args = match serde_json::from_str::<Value>(&args) {
                Ok(args) => args,
                Err(err) => return report_failure(&ToolError::from(err)),
            };
            return match tools.invoke(&tool, args) {
                Ok(result) => print_json(&result),
                Err(err) => report_failure(&err),
            };
        }
        Command::Tools | Command::Prompt => return ExitCode::SUCCESS,
    };

    match tools.invoke(name, args) {
        Ok(result) => print_json(&result),
        Err(err) => report_failure(&err),
    }
}

fn print_json(value: &Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to render result: {err}");
            ExitCode::FAILURE
        }
    }
}

fn report_failure(err: &ToolError) -> ExitCode {
    match failure_json(err) {
        Ok(text) => println!("{text}"),
        Err(render_err) => eprintln!(
            "{}: {err} (failed to render result: {render_err})",
            err.code()
        ),
    }
    ExitCode::FAILURE
}

fn failure_json(err: &ToolError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&err.to_payload())
}
