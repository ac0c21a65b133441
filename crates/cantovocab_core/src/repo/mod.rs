//! Repository layer for the vocabulary store.
//!
//! # Responsibility
//! - Define the data access contract used by matcher and services.
//! - Isolate SQLite query details from practice orchestration.
//!
//! # Invariants
//! - Write paths call `Word::validate()` before SQL mutations.
//! - Inserting an existing key yields `RepoError::DuplicateKey`, never a raw
//!   constraint error.

pub mod word_repo;
