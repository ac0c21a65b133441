//! Vocabulary maintenance service.
//!
//! # Responsibility
//! - Add words, remove words by free-text query and export the vocabulary.
//!
//! # Invariants
//! - Blank keys or translations are rejected before any SQL runs.
//! - Only canonical-key uniqueness is enforced on add; a second key with a
//!   translation equal to an existing one is accepted.

use crate::matcher::WordMatcher;
use crate::model::word::Word;
use crate::repo::word_repo::{RepoResult, WordOrder, WordRepository};
use crate::service::error::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{info, warn};

/// Export text plus the number of words it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabExport {
    pub text: String,
    pub count: usize,
}

/// Service facade for word creation, removal and export.
pub struct VocabService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> VocabService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a new word at minimum proficiency, practiced `today`.
    pub fn add_word(
        &self,
        canonical_key: &str,
        translation: &str,
        today: NaiveDate,
    ) -> ServiceResult<Word> {
        if canonical_key.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "canonical_key is required".to_string(),
            ));
        }
        if translation.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "translation is required".to_string(),
            ));
        }

        let word = Word::new(canonical_key, translation, today);
        match self.repo.create_word(&word) {
            Ok(()) => {
                info!("event=word_add module=service status=ok");
                Ok(word)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                warn!("event=word_add module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Removes the word that `query_text` resolves to and returns it.
    pub fn remove_word(&self, query_text: &str) -> ServiceResult<Word> {
        if query_text.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "query_text is required".to_string(),
            ));
        }

        let key = WordMatcher::new(&self.repo)
            .resolve_key(query_text)?
            .ok_or_else(|| ServiceError::WordNotFound(query_text.trim().to_string()))?;

        let removed = self
            .repo
            .delete_word(&key)?
            .ok_or_else(|| ServiceError::WordNotFound(key.clone()))?;
        info!("event=word_remove module=service status=ok");
        Ok(removed)
    }

    /// Renders every word as `key, translation` lines in alphabetical order.
    pub fn export(&self) -> RepoResult<VocabExport> {
        let words = self.repo.list_words(WordOrder::Alphabetical)?;
        Ok(VocabExport {
            text: export_lines(&words),
            count: words.len(),
        })
    }
}

/// Joins words into newline-delimited `key, translation` text.
pub fn export_lines(words: &[Word]) -> String {
    words
        .iter()
        .map(|word| format!("{}, {}", word.canonical_key, word.translation))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::export_lines;
    use crate::model::word::Word;
    use chrono::NaiveDate;

    #[test]
    fn export_lines_are_newline_delimited_pairs() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let words = vec![
            Word::new("cat", "maau1", today),
            Word::new("dog", "gau2", today),
        ];
        assert_eq!(export_lines(&words), "cat, maau1\ndog, gau2");
        assert_eq!(export_lines(&[]), "");
    }
}
