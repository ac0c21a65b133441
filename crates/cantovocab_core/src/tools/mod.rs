//! Tool surface exposed to the hosted model.
//!
//! # Responsibility
//! - Name and describe every callable action with a JSON-schema contract.
//! - Validate arguments into typed structs before any store access.
//! - Map service outcomes to structured JSON results.
//!
//! # Invariants
//! - Every call is handled on its own; no ordering between calls is assumed.
//! - Only `StoreUnavailable` is fatal. Other failures are returned to the
//!   model as `{"success": false, "error": {...}}` payloads.

pub mod args;
pub mod definitions;
pub mod dispatch;

use crate::db::DbError;
use crate::repo::word_repo::RepoError;
use crate::service::error::ServiceError;
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use definitions::{tool_definitions, ToolDefinition, ToolName, SYSTEM_PROMPT};
pub use dispatch::VocabTools;

pub type ToolResult<T> = Result<T, ToolError>;

/// Failure of one tool call.
#[derive(Debug)]
pub enum ToolError {
    InvalidInput(String),
    DuplicateKey(String),
    WordNotFound(String),
    UnknownTool(String),
    /// Store cannot be opened or queried; ends the current request.
    StoreUnavailable(String),
}

impl ToolError {
    /// Stable machine-readable code carried in failure payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::DuplicateKey(_) => "duplicate_key",
            Self::WordNotFound(_) => "word_not_found",
            Self::UnknownTool(_) => "unknown_tool",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Structured failure handed back to the model.
    pub fn to_payload(&self) -> Value {
        json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        })
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::DuplicateKey(key) => write!(f, "`{key}` is already in the vocabulary"),
            Self::WordNotFound(query) => write!(f, "no vocabulary word matches `{query}`"),
            Self::UnknownTool(name) => write!(f, "unknown tool `{name}`"),
            Self::StoreUnavailable(message) => write!(f, "vocabulary store unavailable: {message}"),
        }
    }
}

impl Error for ToolError {}

impl From<ServiceError> for ToolError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::InvalidInput(message) => Self::InvalidInput(message),
            ServiceError::DuplicateKey(key) => Self::DuplicateKey(key),
            ServiceError::WordNotFound(query) => Self::WordNotFound(query),
            ServiceError::Repo(err) => Self::StoreUnavailable(err.to_string()),
        }
    }
}

impl From<RepoError> for ToolError {
    fn from(value: RepoError) -> Self {
        ServiceError::from(value).into()
    }
}

impl From<DbError> for ToolError {
    fn from(value: DbError) -> Self {
        Self::StoreUnavailable(value.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidInput(value.to_string())
    }
}
