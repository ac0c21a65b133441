//! Typed tool arguments.
//!
//! Unknown fields are rejected so a malformed call fails closed instead of
//! being half-applied.

use crate::service::practice_service::ReviewMode;
use crate::service::progress_service::ProgressEntry;
use crate::tools::{ToolError, ToolResult};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Decodes a raw argument object. `null` is treated as `{}`.
pub fn parse_args<T: DeserializeOwned>(raw: Value) -> ToolResult<T> {
    let raw = match raw {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    Ok(serde_json::from_value(raw)?)
}

/// Argument shape for tools that take no input.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PracticeArgs {
    /// `due_review` for words due today, `full_review` for every word.
    pub mode: ReviewMode,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddWordArgs {
    /// English word or phrase, used as the unique key.
    pub canonical_key: String,
    /// Jyutping romanization. Separate alternatives with `/`.
    pub translation: String,
}

impl AddWordArgs {
    pub fn validate(&self) -> ToolResult<()> {
        require_text("canonical_key", &self.canonical_key)?;
        require_text("translation", &self.translation)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RemoveWordArgs {
    /// English key or Jyutping of the word to delete.
    pub query_text: String,
}

impl RemoveWordArgs {
    pub fn validate(&self) -> ToolResult<()> {
        require_text("query_text", &self.query_text)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProgressEntryArg {
    /// English key or Jyutping of the practiced word.
    pub query_text: String,
    /// Whether the learner got it right.
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProgressArgs {
    /// One entry per practiced word.
    pub entries: Vec<ProgressEntryArg>,
}

impl UpdateProgressArgs {
    pub fn validate(&self) -> ToolResult<()> {
        if self.entries.is_empty() {
            return Err(ToolError::InvalidInput(
                "entries must contain at least one outcome".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_entries(self) -> Vec<ProgressEntry> {
        self.entries
            .into_iter()
            .map(|entry| ProgressEntry::new(entry.query_text, entry.success))
            .collect()
    }
}

fn require_text(field: &str, value: &str) -> ToolResult<()> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidInput(format!("{field} is required")));
    }
    if value.chars().any(char::is_control) {
        return Err(ToolError::InvalidInput(format!(
            "{field} must be a single line without control characters"
        )));
    }
    Ok(())
}
