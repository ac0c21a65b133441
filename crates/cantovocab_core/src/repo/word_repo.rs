//! Word repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and review-order queries over the `words` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Every query returns an empty result on an empty table.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::word::{format_date, parse_date, Word, WordValidationError};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const WORD_SELECT_SQL: &str = "SELECT
    canonical_key,
    translation,
    last_practiced_date,
    proficiency_level
FROM words";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for word persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(WordValidationError),
    Db(DbError),
    /// Insert hit an existing canonical key.
    DuplicateKey(String),
    NotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateKey(key) => write!(f, "word already exists: `{key}`"),
            Self::NotFound(key) => write!(f, "word not found: `{key}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted word data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateKey(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<WordValidationError> for RepoError {
    fn from(value: WordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Ordering for full-table listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordOrder {
    /// By canonical key, case-insensitive.
    #[default]
    Alphabetical,
    /// Oldest practice date first; equally stale words are shuffled.
    LeastRecentlyPracticed,
    Random,
}

impl WordOrder {
    fn order_by_sql(self) -> &'static str {
        match self {
            Self::Alphabetical => "canonical_key COLLATE NOCASE ASC, canonical_key ASC",
            Self::LeastRecentlyPracticed => "last_practiced_date ASC, RANDOM()",
            Self::Random => "RANDOM()",
        }
    }
}

/// Repository interface for the vocabulary store.
pub trait WordRepository {
    /// Inserts a new word; fails with `DuplicateKey` when the key exists.
    fn create_word(&self, word: &Word) -> RepoResult<()>;
    fn get_word(&self, canonical_key: &str) -> RepoResult<Option<Word>>;
    /// Overwrites practice date and level of an existing word.
    fn update_progress(
        &self,
        canonical_key: &str,
        last_practiced_date: NaiveDate,
        proficiency_level: u32,
    ) -> RepoResult<()>;
    /// Deletes by exact key and returns the removed record.
    fn delete_word(&self, canonical_key: &str) -> RepoResult<Option<Word>>;
    fn list_words(&self, order: WordOrder) -> RepoResult<Vec<Word>>;
    /// Words practiced on or before `today`, oldest first.
    fn list_due(&self, today: NaiveDate) -> RepoResult<Vec<Word>>;
    /// Uniform sample without replacement of at most `limit` words.
    fn sample_words(&self, limit: u32) -> RepoResult<Vec<Word>>;
    /// Lowest level first, ties broken by oldest practice date.
    fn least_proficient(&self) -> RepoResult<Option<Word>>;
    /// Every word sitting at the global minimum level, oldest first.
    fn lowest_proficiency_words(&self) -> RepoResult<Vec<Word>>;
    fn count_words(&self) -> RepoResult<u64>;
}

/// SQLite-backed word repository borrowing a migrated connection.
pub struct SqliteWordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordRepository<'conn> {
    /// Constructs a repository, rejecting connections whose schema is not
    /// at the version this binary writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let latest = latest_version();
        if version != latest {
            return Err(RepoError::InvalidData(format!(
                "connection schema version {version} does not match expected {latest}; open it with open_db"
            )));
        }
        Ok(Self { conn })
    }

    fn query_words(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Word>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut words = Vec::new();
        while let Some(row) = rows.next()? {
            words.push(parse_word_row(row)?);
        }
        Ok(words)
    }
}

impl WordRepository for SqliteWordRepository<'_> {
    fn create_word(&self, word: &Word) -> RepoResult<()> {
        word.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO words (
                canonical_key,
                translation,
                last_practiced_date,
                proficiency_level
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                word.canonical_key.as_str(),
                word.translation.as_str(),
                format_date(word.last_practiced_date),
                i64::from(word.proficiency_level),
            ],
        );

        match inserted {
            Ok(_) => {
                debug!("event=word_create module=repo status=ok");
                Ok(())
            }
            Err(err) if is_primary_key_violation(&err) => {
                Err(RepoError::DuplicateKey(word.canonical_key.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_word(&self, canonical_key: &str) -> RepoResult<Option<Word>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORD_SELECT_SQL} WHERE canonical_key = ?1;"))?;
        let mut rows = stmt.query([canonical_key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_word_row(row)?));
        }
        Ok(None)
    }

    fn update_progress(
        &self,
        canonical_key: &str,
        last_practiced_date: NaiveDate,
        proficiency_level: u32,
    ) -> RepoResult<()> {
        if proficiency_level < crate::model::word::MIN_PROFICIENCY {
            return Err(RepoError::Validation(
                WordValidationError::ProficiencyBelowFloor(proficiency_level),
            ));
        }

        let changed = self.conn.execute(
            "UPDATE words
             SET
                last_practiced_date = ?2,
                proficiency_level = ?3
             WHERE canonical_key = ?1;",
            params![
                canonical_key,
                format_date(last_practiced_date),
                i64::from(proficiency_level),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(canonical_key.to_string()));
        }
        Ok(())
    }

    fn delete_word(&self, canonical_key: &str) -> RepoResult<Option<Word>> {
        let removed = self
            .conn
            .query_row(
                "DELETE FROM words
                 WHERE canonical_key = ?1
                 RETURNING canonical_key, translation, last_practiced_date, proficiency_level;",
                [canonical_key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;

        removed
            .map(|(key, translation, date, level)| build_word(key, translation, &date, level))
            .transpose()
    }

    fn list_words(&self, order: WordOrder) -> RepoResult<Vec<Word>> {
        self.query_words(
            &format!("{WORD_SELECT_SQL} ORDER BY {};", order.order_by_sql()),
            [],
        )
    }

    fn list_due(&self, today: NaiveDate) -> RepoResult<Vec<Word>> {
        self.query_words(
            &format!(
                "{WORD_SELECT_SQL}
                 WHERE last_practiced_date <= ?1
                 ORDER BY last_practiced_date ASC, canonical_key ASC;"
            ),
            [format_date(today)],
        )
    }

    fn sample_words(&self, limit: u32) -> RepoResult<Vec<Word>> {
        self.query_words(
            &format!("{WORD_SELECT_SQL} ORDER BY RANDOM() LIMIT ?1;"),
            [i64::from(limit)],
        )
    }

    fn least_proficient(&self) -> RepoResult<Option<Word>> {
        let mut words = self.query_words(
            &format!(
                "{WORD_SELECT_SQL}
                 ORDER BY proficiency_level ASC, last_practiced_date ASC, canonical_key ASC
                 LIMIT 1;"
            ),
            [],
        )?;
        Ok(words.pop())
    }

    fn lowest_proficiency_words(&self) -> RepoResult<Vec<Word>> {
        self.query_words(
            &format!(
                "{WORD_SELECT_SQL}
                 WHERE proficiency_level = (SELECT MIN(proficiency_level) FROM words)
                 ORDER BY last_practiced_date ASC, canonical_key ASC;"
            ),
            [],
        )
    }

    fn count_words(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM words;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }
}

fn parse_word_row(row: &Row<'_>) -> RepoResult<Word> {
    let date_text: String = row.get("last_practiced_date")?;
    build_word(
        row.get("canonical_key")?,
        row.get("translation")?,
        &date_text,
        row.get("proficiency_level")?,
    )
}

fn build_word(
    canonical_key: String,
    translation: String,
    date_text: &str,
    proficiency_level: i64,
) -> RepoResult<Word> {
    let last_practiced_date = parse_date(date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in words.last_practiced_date"
        ))
    })?;
    let proficiency_level = u32::try_from(proficiency_level).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid level `{proficiency_level}` in words.proficiency_level"
        ))
    })?;

    let word = Word {
        canonical_key,
        translation,
        last_practiced_date,
        proficiency_level,
    };
    word.validate()?;
    Ok(word)
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
