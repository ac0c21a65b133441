//! Tool names, descriptions, parameter schemas and the tutor system prompt.

use crate::tools::args::{AddWordArgs, NoArgs, PracticeArgs, RemoveWordArgs, UpdateProgressArgs};
use schemars::{schema_for, JsonSchema};
use serde::Serialize;
use serde_json::{json, Value};

/// Instructions given to the hosted model at the start of every session.
pub const SYSTEM_PROMPT: &str = "\
You are a friendly Cantonese tutor. The learner's vocabulary lives in a store \
you can only reach through the provided tools. Write Cantonese in Jyutping \
romanization.

- Before a practice round, call get_words_for_practice with mode \"due_review\"; \
fall back to \"full_review\" when nothing is due.
- To target weak spots, call get_least_proficient_word or \
get_lowest_proficiency_words.
- For stories, dialogues or example sentences, call get_random_words and build \
the content from those words.
- After the learner answers, call update_progress once with one entry per \
practiced word and whether the answer was correct. You may pass either the \
English key or the Jyutping as query_text.
- When the learner asks to learn a new word, call add_word. If it fails with \
duplicate_key, tell the learner they already know it.
- Only call remove_word when the learner explicitly asks to delete a word.
- Call export_words when the learner wants a full list.

Never invent vocabulary results: if a tool reports an error, explain it briefly \
and continue the lesson.";

/// Every action the model may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetWordsForPractice,
    GetRandomWords,
    GetLeastProficientWord,
    GetLowestProficiencyWords,
    AddWord,
    RemoveWord,
    UpdateProgress,
    ExportWords,
}

impl ToolName {
    pub const ALL: [ToolName; 8] = [
        Self::GetWordsForPractice,
        Self::GetRandomWords,
        Self::GetLeastProficientWord,
        Self::GetLowestProficiencyWords,
        Self::AddWord,
        Self::RemoveWord,
        Self::UpdateProgress,
        Self::ExportWords,
    ];

    /// Wire name used in model tool calls.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetWordsForPractice => "get_words_for_practice",
            Self::GetRandomWords => "get_random_words",
            Self::GetLeastProficientWord => "get_least_proficient_word",
            Self::GetLowestProficiencyWords => "get_lowest_proficiency_words",
            Self::AddWord => "add_word",
            Self::RemoveWord => "remove_word",
            Self::UpdateProgress => "update_progress",
            Self::ExportWords => "export_words",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|name| name.as_str() == value)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::GetWordsForPractice => {
                "Fetch words to practice. due_review returns words last practiced today or earlier, oldest first; full_review returns every word, stalest first."
            }
            Self::GetRandomWords => {
                "Fetch up to 50 random vocabulary words for generating varied practice content."
            }
            Self::GetLeastProficientWord => {
                "Fetch the single word with the lowest proficiency, preferring the one practiced longest ago."
            }
            Self::GetLowestProficiencyWords => {
                "Fetch every word tied at the lowest proficiency level, plus that level."
            }
            Self::AddWord => "Add a new word with its Jyutping translation.",
            Self::RemoveWord => "Delete a word, found by its English key or Jyutping.",
            Self::UpdateProgress => {
                "Record practice outcomes. Each success raises proficiency by one; each miss lowers it by one, never below 1."
            }
            Self::ExportWords => {
                "Export the whole vocabulary as `english, jyutping` lines in alphabetical order."
            }
        }
    }

    fn parameters(self) -> Value {
        match self {
            Self::GetWordsForPractice => schema_value::<PracticeArgs>(),
            Self::AddWord => schema_value::<AddWordArgs>(),
            Self::RemoveWord => schema_value::<RemoveWordArgs>(),
            Self::UpdateProgress => schema_value::<UpdateProgressArgs>(),
            Self::GetRandomWords
            | Self::GetLeastProficientWord
            | Self::GetLowestProficiencyWords
            | Self::ExportWords => schema_value::<NoArgs>(),
        }
    }
}

/// Function-calling definition handed to the model alongside the prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON schema of the argument object.
    pub parameters: Value,
}

/// Definitions for every tool, in a stable order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL
        .into_iter()
        .map(|name| ToolDefinition {
            name: name.as_str(),
            description: name.description(),
            parameters: name.parameters(),
        })
        .collect()
}

fn schema_value<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}
