//! Error taxonomy shared by vocabulary services.

use crate::repo::word_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error with store failures kept apart from caller mistakes.
#[derive(Debug)]
pub enum ServiceError {
    /// Missing or empty required field; raised before touching the store.
    InvalidInput(String),
    /// A word with this canonical key already exists.
    DuplicateKey(String),
    /// Query text did not resolve to any stored word.
    WordNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::DuplicateKey(key) => write!(f, "word already exists: `{key}`"),
            Self::WordNotFound(query) => write!(f, "no word matches `{query}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateKey(key) => Self::DuplicateKey(key),
            RepoError::NotFound(key) => Self::WordNotFound(key),
            RepoError::Validation(err) => Self::InvalidInput(err.to_string()),
            other => Self::Repo(other),
        }
    }
}
