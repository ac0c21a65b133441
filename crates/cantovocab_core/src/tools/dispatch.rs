//! Tool call dispatcher over an owned store connection.

use crate::model::word::Word;
use crate::repo::word_repo::SqliteWordRepository;
use crate::service::practice_service::PracticeService;
use crate::service::progress_service::{FailedEntry, ProgressService};
use crate::service::vocab_service::VocabService;
use crate::tools::args::{
    parse_args, AddWordArgs, NoArgs, PracticeArgs, RemoveWordArgs, UpdateProgressArgs,
};
use crate::tools::definitions::ToolName;
use crate::tools::{ToolError, ToolResult};
use chrono::{Local, NaiveDate};
use log::{info, warn};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

#[derive(Debug, Serialize)]
struct WordsOutput {
    words: Vec<Word>,
    count: usize,
}

impl From<Vec<Word>> for WordsOutput {
    fn from(words: Vec<Word>) -> Self {
        Self {
            count: words.len(),
            words,
        }
    }
}

#[derive(Debug, Serialize)]
struct LeastProficientOutput {
    word: Option<Word>,
}

#[derive(Debug, Serialize)]
struct LowestProficiencyOutput {
    words: Vec<Word>,
    min_level: Option<u32>,
}

#[derive(Debug, Serialize)]
struct AddWordOutput {
    success: bool,
    word: Word,
}

#[derive(Debug, Serialize)]
struct RemoveWordOutput {
    success: bool,
    removed: Word,
}

#[derive(Debug, Serialize)]
struct UpdateProgressOutput {
    success: bool,
    updated: Vec<Word>,
    failed: Vec<FailedEntry>,
    succeeded_count: usize,
    failed_count: usize,
}

#[derive(Debug, Serialize)]
struct ExportOutput {
    text: String,
    count: usize,
}

/// Executes tool calls against a borrowed, migrated connection.
pub struct VocabTools<'conn> {
    conn: &'conn Connection,
    fixed_today: Option<NaiveDate>,
}

impl<'conn> VocabTools<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            fixed_today: None,
        }
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Invokes one tool by wire name with a raw JSON argument object.
    ///
    /// # Side effects
    /// - Emits `tool_call` logging events with tool name, duration and status.
    pub fn invoke(&self, name: &str, args: Value) -> ToolResult<Value> {
        let started_at = Instant::now();
        let tool = ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()));
        let result = tool.and_then(|tool| self.dispatch(tool, args));

        match &result {
            Ok(_) => info!(
                "event=tool_call module=tools status=ok tool={name} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=tool_call module=tools status=error tool={name} duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        result
    }

    fn repo(&self) -> ToolResult<SqliteWordRepository<'conn>> {
        SqliteWordRepository::try_new(self.conn)
            .map_err(|err| ToolError::StoreUnavailable(err.to_string()))
    }

    fn dispatch(&self, tool: ToolName, args: Value) -> ToolResult<Value> {
        let today = self.today();

        match tool {
            ToolName::GetWordsForPractice => {
                let args: PracticeArgs = parse_args(args)?;
                let words = PracticeService::new(self.repo()?).review(args.mode, today)?;
                to_value(WordsOutput::from(words))
            }
            ToolName::GetRandomWords => {
                parse_args::<NoArgs>(args)?;
                let words = PracticeService::new(self.repo()?).random_sample()?;
                to_value(WordsOutput::from(words))
            }
            ToolName::GetLeastProficientWord => {
                parse_args::<NoArgs>(args)?;
                let word = PracticeService::new(self.repo()?).least_proficient()?;
                to_value(LeastProficientOutput { word })
            }
            ToolName::GetLowestProficiencyWords => {
                parse_args::<NoArgs>(args)?;
                let lowest = PracticeService::new(self.repo()?).lowest_proficiency()?;
                to_value(LowestProficiencyOutput {
                    words: lowest.words,
                    min_level: lowest.min_level,
                })
            }
            ToolName::AddWord => {
                let args: AddWordArgs = parse_args(args)?;
                args.validate()?;
                let word = VocabService::new(self.repo()?).add_word(
                    &args.canonical_key,
                    &args.translation,
                    today,
                )?;
                to_value(AddWordOutput {
                    success: true,
                    word,
                })
            }
            ToolName::RemoveWord => {
                let args: RemoveWordArgs = parse_args(args)?;
                args.validate()?;
                let removed = VocabService::new(self.repo()?).remove_word(&args.query_text)?;
                to_value(RemoveWordOutput {
                    success: true,
                    removed,
                })
            }
            ToolName::UpdateProgress => {
                let args: UpdateProgressArgs = parse_args(args)?;
                args.validate()?;
                let report = ProgressService::new(self.repo()?)
                    .apply_outcomes(&args.into_entries(), today)?;
                to_value(UpdateProgressOutput {
                    success: report.success(),
                    succeeded_count: report.succeeded_count(),
                    failed_count: report.failed_count(),
                    updated: report.updated,
                    failed: report.failed,
                })
            }
            ToolName::ExportWords => {
                parse_args::<NoArgs>(args)?;
                let export = VocabService::new(self.repo()?).export()?;
                to_value(ExportOutput {
                    text: export.text,
                    count: export.count,
                })
            }
        }
    }
}

fn to_value(output: impl Serialize) -> ToolResult<Value> {
    serde_json::to_value(output)
        .map_err(|err| ToolError::StoreUnavailable(format!("failed to encode tool result: {err}")))
}
