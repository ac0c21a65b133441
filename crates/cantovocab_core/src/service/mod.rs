//! Vocabulary use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and matcher calls into practice use-cases.
//! - Keep the tool surface decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Services take "today" from the caller, so date logic stays testable.

pub mod error;
pub mod practice_service;
pub mod progress_service;
pub mod vocab_service;
