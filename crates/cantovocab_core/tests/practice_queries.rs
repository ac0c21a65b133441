use cantovocab_core::db::open_db_in_memory;
use cantovocab_core::{
    PracticeService, ReviewMode, SqliteWordRepository, Word, WordRepository, RANDOM_SAMPLE_SIZE,
};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use std::collections::HashSet;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn insert(conn: &Connection, key: &str, date: NaiveDate, level: u32) {
    let repo = SqliteWordRepository::try_new(conn).unwrap();
    let mut word = Word::new(key, format!("{key}-jp"), date);
    word.proficiency_level = level;
    repo.create_word(&word).unwrap();
}

fn keys(words: &[Word]) -> Vec<&str> {
    words.iter().map(|word| word.canonical_key.as_str()).collect()
}

#[test]
fn due_review_excludes_future_dates() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "yesterday", today() - Duration::days(1), 1);
    insert(&conn, "tomorrow", today() + Duration::days(1), 1);
    let service = PracticeService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let due = service.due_review(today()).unwrap();
    assert_eq!(keys(&due), vec!["yesterday"]);
}

#[test]
fn due_review_includes_today_and_orders_oldest_first() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "today", today(), 1);
    insert(&conn, "last_week", today() - Duration::days(7), 1);
    insert(&conn, "last_month", today() - Duration::days(30), 1);
    let service = PracticeService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let due = service.review(ReviewMode::DueReview, today()).unwrap();
    assert_eq!(keys(&due), vec!["last_month", "last_week", "today"]);
}

#[test]
fn full_review_returns_every_word_stalest_first() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "future", today() + Duration::days(3), 1);
    insert(&conn, "old_a", today() - Duration::days(10), 1);
    insert(&conn, "old_b", today() - Duration::days(10), 1);
    insert(&conn, "recent", today() - Duration::days(1), 1);
    let service = PracticeService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let words = service.review(ReviewMode::FullReview, today()).unwrap();
    let order = keys(&words);
    assert_eq!(order.len(), 4);
    let stale: HashSet<&str> = order[..2].iter().copied().collect();
    assert_eq!(stale, HashSet::from(["old_a", "old_b"]));
    assert_eq!(&order[2..], &["recent", "future"]);
}

#[test]
fn random_sample_with_few_words_returns_all_without_duplicates() {
    let conn = open_db_in_memory().unwrap();
    for index in 0..7 {
        insert(&conn, &format!("w{index}"), today(), 1);
    }
    let service = PracticeService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let sample = service.random_sample().unwrap();
    let unique: HashSet<&str> = keys(&sample).into_iter().collect();
    assert_eq!(sample.len(), 7);
    assert_eq!(unique.len(), 7);
}

#[test]
fn random_sample_caps_at_sample_size() {
    let conn = open_db_in_memory().unwrap();
    for index in 0..(RANDOM_SAMPLE_SIZE + 15) {
        insert(&conn, &format!("w{index}"), today(), 1);
    }
    let service = PracticeService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let sample = service.random_sample().unwrap();
    let unique: HashSet<&str> = keys(&sample).into_iter().collect();
    assert_eq!(sample.len(), RANDOM_SAMPLE_SIZE as usize);
    assert_eq!(unique.len(), RANDOM_SAMPLE_SIZE as usize);
}

#[test]
fn least_proficient_breaks_ties_by_oldest_date() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "strong", today() - Duration::days(90), 5);
    insert(&conn, "weak_recent", today() - Duration::days(1), 2);
    insert(&conn, "weak_old", today() - Duration::days(20), 2);
    let service = PracticeService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let word = service.least_proficient().unwrap().unwrap();
    assert_eq!(word.canonical_key, "weak_old");
}

#[test]
fn lowest_proficiency_returns_every_tie_and_the_level() {
    let conn = open_db_in_memory().unwrap();
    insert(&conn, "a", today() - Duration::days(2), 3);
    insert(&conn, "b", today() - Duration::days(5), 3);
    insert(&conn, "c", today(), 4);
    let service = PracticeService::new(SqliteWordRepository::try_new(&conn).unwrap());

    let lowest = service.lowest_proficiency().unwrap();
    assert_eq!(lowest.min_level, Some(3));
    assert_eq!(keys(&lowest.words), vec!["b", "a"]);
}

#[test]
fn selections_on_empty_store_are_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = PracticeService::new(SqliteWordRepository::try_new(&conn).unwrap());

    assert!(service.full_review().unwrap().is_empty());
    assert!(service.due_review(today()).unwrap().is_empty());
    assert!(service.random_sample().unwrap().is_empty());
    assert!(service.least_proficient().unwrap().is_none());
    let lowest = service.lowest_proficiency().unwrap();
    assert!(lowest.words.is_empty());
    assert_eq!(lowest.min_level, None);
}
