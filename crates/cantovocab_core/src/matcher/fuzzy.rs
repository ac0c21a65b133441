//! Multi-pass fuzzy lookup over the vocabulary table.
//!
//! Rules run in order over every stored word and the first hit wins:
//! 1. trimmed, case-insensitive key equality
//! 2. trimmed, case-insensitive translation equality
//! 3. normalized key or translation equality
//! 4. normalized query against one `/` alternative of the translation
//!
//! Lookup is a linear scan, which is fine for vocabularies in the low
//! thousands.

use crate::model::word::Word;
use crate::repo::word_repo::{RepoResult, WordOrder, WordRepository};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static SLASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*/\s*").expect("valid slash regex"));

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    ExactKey,
    ExactTranslation,
    Normalized,
    TranslationAlternative,
}

/// Resolved word plus the rule that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    pub word: Word,
    pub rule: MatchRule,
}

impl WordMatch {
    pub fn canonical_key(&self) -> &str {
        &self.word.canonical_key
    }
}

/// Lowercases, trims, collapses whitespace runs and tightens `a / b` to `a/b`.
pub fn normalize_text(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let collapsed = WHITESPACE_RE.replace_all(&lowered, " ");
    SLASH_RE.replace_all(&collapsed, "/").into_owned()
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Resolves `query` against an in-memory slice of words.
pub fn resolve_in<'w>(words: &'w [Word], query: &str) -> Option<(&'w Word, MatchRule)> {
    let folded = fold(query);
    if folded.is_empty() {
        return None;
    }

    if let Some(word) = words.iter().find(|w| fold(&w.canonical_key) == folded) {
        return Some((word, MatchRule::ExactKey));
    }
    if let Some(word) = words.iter().find(|w| fold(&w.translation) == folded) {
        return Some((word, MatchRule::ExactTranslation));
    }

    let normalized = normalize_text(query);
    if let Some(word) = words.iter().find(|w| {
        normalize_text(&w.canonical_key) == normalized || normalize_text(&w.translation) == normalized
    }) {
        return Some((word, MatchRule::Normalized));
    }

    words
        .iter()
        .find(|w| {
            let translation = normalize_text(&w.translation);
            translation.contains('/')
                && translation
                    .split('/')
                    .map(str::trim)
                    .any(|part| !part.is_empty() && part == normalized)
        })
        .map(|word| (word, MatchRule::TranslationAlternative))
}

/// Store-backed matcher. Reads the table fresh on every lookup.
pub struct WordMatcher<'r, R: WordRepository> {
    repo: &'r R,
}

impl<'r, R: WordRepository> WordMatcher<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    /// Resolves free text to a stored word, or `None` when no rule matches.
    pub fn resolve(&self, query: &str) -> RepoResult<Option<WordMatch>> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        let words = self.repo.list_words(WordOrder::Alphabetical)?;
        let found = resolve_in(&words, query).map(|(word, rule)| WordMatch {
            word: word.clone(),
            rule,
        });
        debug!(
            "event=word_match module=matcher status={} rule={:?} scanned={}",
            if found.is_some() { "ok" } else { "miss" },
            found.as_ref().map(|m| m.rule),
            words.len()
        );
        Ok(found)
    }

    /// Resolves free text straight to the stored canonical key.
    pub fn resolve_key(&self, query: &str) -> RepoResult<Option<String>> {
        Ok(self.resolve(query)?.map(|found| found.word.canonical_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn words() -> Vec<Word> {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        vec![
            Word::new("I/my", "ngo5", today),
            Word::new("Homework", "gung1 fo3", today),
            Word::new("recipe", "sik6 coeng2 / zaap6 fo3 pou3", today),
        ]
    }

    #[test]
    fn normalize_collapses_spacing_and_slashes() {
        assert_eq!(normalize_text("  I   /  My "), "i/my");
        assert_eq!(normalize_text("gung1\t fo3"), "gung1 fo3");
    }

    #[test]
    fn exact_key_match_ignores_case_and_padding() {
        let words = words();
        let (word, rule) = resolve_in(&words, "  homework ").unwrap();
        assert_eq!(word.canonical_key, "Homework");
        assert_eq!(rule, MatchRule::ExactKey);
    }

    #[test]
    fn translation_match_returns_canonical_key() {
        let words = words();
        let (word, rule) = resolve_in(&words, "GUNG1 FO3").unwrap();
        assert_eq!(word.canonical_key, "Homework");
        assert_eq!(rule, MatchRule::ExactTranslation);
    }

    #[test]
    fn spaced_slash_query_matches_compact_key() {
        let words = words();
        let (word, rule) = resolve_in(&words, "I / my").unwrap();
        assert_eq!(word.canonical_key, "I/my");
        assert_eq!(rule, MatchRule::Normalized);
    }

    #[test]
    fn single_alternative_matches_compound_translation() {
        let words = words();
        let (full, _) = resolve_in(&words, "sik6 coeng2 / zaap6 fo3 pou3").unwrap();
        assert_eq!(full.canonical_key, "recipe");
        let (part, rule) = resolve_in(&words, "zaap6  fo3 pou3").unwrap();
        assert_eq!(part.canonical_key, "recipe");
        assert_eq!(rule, MatchRule::TranslationAlternative);
        let (first, _) = resolve_in(&words, "Sik6 Coeng2").unwrap();
        assert_eq!(first.canonical_key, "recipe");
    }

    #[test]
    fn blank_or_unknown_queries_do_not_match() {
        let words = words();
        assert!(resolve_in(&words, "").is_none());
        assert!(resolve_in(&words, "   ").is_none());
        assert!(resolve_in(&words, "fo3").is_none());
        assert!(resolve_in(&words, "/").is_none());
    }
}
