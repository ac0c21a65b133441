use cantovocab_core::db::open_db_in_memory;
use cantovocab_core::{
    EntryFailureReason, ProgressEntry, ProgressService, SqliteWordRepository, Word,
    WordRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn seeded() -> Connection {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();
    let mut cat = Word::new("cat", "maau1", day(1));
    cat.proficiency_level = 3;
    repo.create_word(&cat).unwrap();
    repo.create_word(&Word::new("dog", "gau2", day(1))).unwrap();
    repo.create_word(&Word::new("I/my", "ngo5", day(1))).unwrap();
    conn
}

fn level(conn: &Connection, key: &str) -> u32 {
    SqliteWordRepository::try_new(conn)
        .unwrap()
        .get_word(key)
        .unwrap()
        .unwrap()
        .proficiency_level
}

#[test]
fn batch_with_one_unknown_entry_applies_the_rest() {
    let conn = seeded();
    let service = ProgressService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let report = service
        .apply_outcomes(
            &[
                ProgressEntry::new("cat", true),
                ProgressEntry::new("unicorn", true),
                ProgressEntry::new("gau2", false),
            ],
            day(10),
        )
        .unwrap();

    assert_eq!(report.succeeded_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert!(report.success());
    assert_eq!(report.failed[0].query_text, "unicorn");
    assert_eq!(report.failed[0].reason, EntryFailureReason::WordNotFound);

    assert_eq!(report.updated[0].canonical_key, "cat");
    assert_eq!(report.updated[0].proficiency_level, 4);
    assert_eq!(report.updated[1].canonical_key, "dog");
    assert_eq!(report.updated[1].proficiency_level, 1);
    assert_eq!(level(&conn, "cat"), 4);
    assert_eq!(level(&conn, "dog"), 1);
}

#[test]
fn repeated_failures_never_drop_below_one() {
    let conn = seeded();
    let service = ProgressService::new(SqliteWordRepository::try_new(&conn).unwrap());

    for _ in 0..5 {
        service
            .apply_outcomes(&[ProgressEntry::new("dog", false)], day(10))
            .unwrap();
    }
    assert_eq!(level(&conn, "dog"), 1);
}

#[test]
fn success_then_failure_restores_original_level() {
    let conn = seeded();
    let service = ProgressService::new(SqliteWordRepository::try_new(&conn).unwrap());

    service
        .apply_outcomes(&[ProgressEntry::new("cat", true)], day(10))
        .unwrap();
    assert_eq!(level(&conn, "cat"), 4);
    service
        .apply_outcomes(&[ProgressEntry::new("cat", false)], day(10))
        .unwrap();
    assert_eq!(level(&conn, "cat"), 3);
}

#[test]
fn repeated_entries_for_one_word_compound() {
    let conn = seeded();
    let service = ProgressService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let report = service
        .apply_outcomes(
            &[
                ProgressEntry::new("dog", true),
                ProgressEntry::new("DOG", true),
            ],
            day(10),
        )
        .unwrap();
    assert_eq!(report.updated[1].proficiency_level, 3);
    assert_eq!(level(&conn, "dog"), 3);
}

#[test]
fn update_stamps_practice_day_even_on_failure() {
    let conn = seeded();
    let service = ProgressService::new(SqliteWordRepository::try_new(&conn).unwrap());

    service
        .apply_outcomes(&[ProgressEntry::new("I / my", false)], day(12))
        .unwrap();
    let word = SqliteWordRepository::try_new(&conn)
        .unwrap()
        .get_word("I/my")
        .unwrap()
        .unwrap();
    assert_eq!(word.last_practiced_date, day(12));
    assert_eq!(word.proficiency_level, 1);
}

#[test]
fn all_unknown_entries_report_no_success() {
    let conn = seeded();
    let service = ProgressService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let report = service
        .apply_outcomes(
            &[ProgressEntry::new("", true), ProgressEntry::new("bird", false)],
            day(10),
        )
        .unwrap();
    assert!(!report.success());
    assert_eq!(report.failed_count(), 2);
    assert!(report.updated.is_empty());
}
