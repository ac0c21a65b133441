//! Free-text resolution of model/user input to stored canonical keys.
//!
//! # Responsibility
//! - Reconcile imprecise text (casing, spacing, slash alternatives) with
//!   keys actually present in the store.
//!
//! # Invariants
//! - Empty input never resolves.
//! - Returned keys are the stored, case-preserved values.

pub mod fuzzy;

pub use fuzzy::{normalize_text, resolve_in, MatchRule, WordMatch, WordMatcher};
