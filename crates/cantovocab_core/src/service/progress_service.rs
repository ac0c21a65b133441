//! Batch practice-outcome updates.
//!
//! # Responsibility
//! - Resolve each outcome's query text to a stored word.
//! - Step proficiency up or down and stamp the practice day.
//!
//! # Invariants
//! - One bad entry never aborts the batch; it lands in `failed`.
//! - Each word update is a single-row write. The batch is not a transaction.
//! - Store errors abort the batch and propagate.

use crate::matcher::WordMatcher;
use crate::model::word::Word;
use crate::repo::word_repo::{RepoResult, WordRepository};
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// One practice outcome reported by the tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Canonical key or translation text, possibly imprecise.
    pub query_text: String,
    pub success: bool,
}

impl ProgressEntry {
    pub fn new(query_text: impl Into<String>, success: bool) -> Self {
        Self {
            query_text: query_text.into(),
            success,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryFailureReason {
    WordNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub query_text: String,
    pub reason: EntryFailureReason,
}

/// Outcome of a batch: updated words in input order plus per-entry failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressReport {
    pub updated: Vec<Word>,
    pub failed: Vec<FailedEntry>,
}

impl ProgressReport {
    pub fn succeeded_count(&self) -> usize {
        self.updated.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// True when at least one entry was applied.
    pub fn success(&self) -> bool {
        !self.updated.is_empty()
    }
}

pub struct ProgressService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> ProgressService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Applies every entry in order, isolating failures per word.
    pub fn apply_outcomes(
        &self,
        entries: &[ProgressEntry],
        today: NaiveDate,
    ) -> RepoResult<ProgressReport> {
        let matcher = WordMatcher::new(&self.repo);
        let mut report = ProgressReport::default();

        for entry in entries {
            let Some(found) = matcher.resolve(&entry.query_text)? else {
                report.failed.push(FailedEntry {
                    query_text: entry.query_text.clone(),
                    reason: EntryFailureReason::WordNotFound,
                });
                continue;
            };

            // Re-read so repeated entries for one word compound.
            let mut current = match self.repo.get_word(found.canonical_key())? {
                Some(word) => word,
                None => {
                    report.failed.push(FailedEntry {
                        query_text: entry.query_text.clone(),
                        reason: EntryFailureReason::WordNotFound,
                    });
                    continue;
                }
            };

            current.record_outcome(entry.success, today);
            self.repo.update_progress(
                &current.canonical_key,
                current.last_practiced_date,
                current.proficiency_level,
            )?;
            report.updated.push(current);
        }

        if report.failed.is_empty() {
            info!(
                "event=progress_update module=service status=ok updated={}",
                report.succeeded_count()
            );
        } else {
            warn!(
                "event=progress_update module=service status=partial updated={} failed={}",
                report.succeeded_count(),
                report.failed_count()
            );
        }
        Ok(report)
    }
}
