//! Read-only practice selections over the vocabulary store.
//!
//! Every selection is stateless and returns an empty result on an empty
//! table.

use crate::model::word::Word;
use crate::repo::word_repo::{RepoResult, WordOrder, WordRepository};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Words handed out for generated practice content.
pub const RANDOM_SAMPLE_SIZE: u32 = 50;

/// Selection used by `get_words_for_practice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewMode {
    /// Only words practiced on or before today.
    DueReview,
    /// Every word, stalest first.
    FullReview,
}

/// Words tied at the globally lowest proficiency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowestProficiency {
    pub words: Vec<Word>,
    /// `None` on an empty table.
    pub min_level: Option<u32>,
}

pub struct PracticeService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> PracticeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn review(&self, mode: ReviewMode, today: NaiveDate) -> RepoResult<Vec<Word>> {
        match mode {
            ReviewMode::DueReview => self.due_review(today),
            ReviewMode::FullReview => self.full_review(),
        }
    }

    /// All words, oldest practice date first, equally stale ones shuffled.
    pub fn full_review(&self) -> RepoResult<Vec<Word>> {
        self.repo.list_words(WordOrder::LeastRecentlyPracticed)
    }

    /// Words due on `today`, oldest first.
    pub fn due_review(&self, today: NaiveDate) -> RepoResult<Vec<Word>> {
        self.repo.list_due(today)
    }

    /// Up to [`RANDOM_SAMPLE_SIZE`] distinct words chosen uniformly.
    pub fn random_sample(&self) -> RepoResult<Vec<Word>> {
        self.repo.sample_words(RANDOM_SAMPLE_SIZE)
    }

    pub fn least_proficient(&self) -> RepoResult<Option<Word>> {
        self.repo.least_proficient()
    }

    pub fn lowest_proficiency(&self) -> RepoResult<LowestProficiency> {
        let words = self.repo.lowest_proficiency_words()?;
        let min_level = words.iter().map(|word| word.proficiency_level).min();
        Ok(LowestProficiency { words, min_level })
    }
}
