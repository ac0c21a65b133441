//! Word domain model.
//!
//! # Responsibility
//! - Define the canonical vocabulary record and its validation rules.
//! - Provide the success/failure proficiency step used by practice updates.
//!
//! # Invariants
//! - `canonical_key` and `translation` are non-empty after trimming and hold
//!   no control characters, so each word exports as one line.
//! - `proficiency_level >= MIN_PROFICIENCY`.
//! - `last_practiced_date` only moves to the practice day, never backwards
//!   through [`Word::record_outcome`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest proficiency a word can have. New words start here.
pub const MIN_PROFICIENCY: u32 = 1;

/// Storage format for `last_practiced_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One vocabulary entry: English-side key plus Jyutping translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Unique source-language text. Case is preserved as entered.
    pub canonical_key: String,
    /// Romanized Cantonese. May hold `/`-separated alternatives.
    pub translation: String,
    /// Serialized as ISO `YYYY-MM-DD`.
    pub last_practiced_date: NaiveDate,
    pub proficiency_level: u32,
}

impl Word {
    /// Creates a fresh word at minimum proficiency, practiced `today`.
    ///
    /// Surrounding whitespace is trimmed from both text fields.
    pub fn new(
        canonical_key: impl AsRef<str>,
        translation: impl AsRef<str>,
        today: NaiveDate,
    ) -> Self {
        Self {
            canonical_key: canonical_key.as_ref().trim().to_string(),
            translation: translation.as_ref().trim().to_string(),
            last_practiced_date: today,
            proficiency_level: MIN_PROFICIENCY,
        }
    }

    /// Validates record invariants before persistence.
    pub fn validate(&self) -> Result<(), WordValidationError> {
        if self.canonical_key.trim().is_empty() {
            return Err(WordValidationError::EmptyCanonicalKey);
        }
        if self.translation.trim().is_empty() {
            return Err(WordValidationError::EmptyTranslation);
        }
        if [&self.canonical_key, &self.translation]
            .iter()
            .any(|text| text.chars().any(char::is_control))
        {
            return Err(WordValidationError::ControlCharacter);
        }
        if self.proficiency_level < MIN_PROFICIENCY {
            return Err(WordValidationError::ProficiencyBelowFloor(
                self.proficiency_level,
            ));
        }
        Ok(())
    }

    /// Applies one practice outcome and stamps the practice day.
    pub fn record_outcome(&mut self, success: bool, today: NaiveDate) {
        self.proficiency_level = next_proficiency(self.proficiency_level, success);
        self.last_practiced_date = today;
    }
}

/// Proficiency after one outcome: `+1` on success, `-1` floored at the minimum.
pub fn next_proficiency(level: u32, success: bool) -> u32 {
    if success {
        level.saturating_add(1)
    } else {
        level.saturating_sub(1).max(MIN_PROFICIENCY)
    }
}

/// Formats a date for the `last_practiced_date` column.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `last_practiced_date` column value.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordValidationError {
    EmptyCanonicalKey,
    EmptyTranslation,
    /// Newline or other control character in the key or translation.
    ControlCharacter,
    ProficiencyBelowFloor(u32),
}

impl Display for WordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCanonicalKey => write!(f, "canonical_key must not be empty"),
            Self::EmptyTranslation => write!(f, "translation must not be empty"),
            Self::ControlCharacter => {
                write!(f, "word text must not contain control characters")
            }
            Self::ProficiencyBelowFloor(level) => write!(
                f,
                "proficiency_level {level} is below the minimum of {MIN_PROFICIENCY}"
            ),
        }
    }
}

impl Error for WordValidationError {}
