//! Core logic for Cantonese vocabulary practice.
//! This crate owns the vocabulary store, fuzzy word matching, practice
//! selections, progress updates and the tool surface a hosted model calls.

pub mod agent;
pub mod config;
pub mod db;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod repo;
pub mod service;
pub mod tools;

pub use agent::{AgentError, ChatMessage, ChatModel, ChatSession, ModelTurn, ToolCall};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use matcher::{normalize_text, MatchRule, WordMatch, WordMatcher};
pub use model::word::{next_proficiency, Word, WordValidationError, MIN_PROFICIENCY};
pub use repo::word_repo::{RepoError, RepoResult, SqliteWordRepository, WordOrder, WordRepository};
pub use service::error::{ServiceError, ServiceResult};
pub use service::practice_service::{
    LowestProficiency, PracticeService, ReviewMode, RANDOM_SAMPLE_SIZE,
};
pub use service::progress_service::{
    EntryFailureReason, FailedEntry, ProgressEntry, ProgressReport, ProgressService,
};
pub use service::vocab_service::{VocabExport, VocabService};
pub use tools::{tool_definitions, ToolDefinition, ToolError, ToolName, VocabTools, SYSTEM_PROMPT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
