//! Vocabulary domain model.
//!
//! # Responsibility
//! - Define the single `Word` record persisted by the store.
//! - Own the proficiency arithmetic shared by every write path.
//!
//! # Invariants
//! - A word is identified by its canonical key; keys are never reused for
//!   another translation through the model layer.
//! - Proficiency never drops below [`word::MIN_PROFICIENCY`].

pub mod word;
