use cantovocab_core::db::open_db_in_memory;
use cantovocab_core::{MatchRule, SqliteWordRepository, Word, WordMatcher, WordRepository};
use chrono::NaiveDate;
use rusqlite::Connection;

fn seeded() -> Connection {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    for (key, translation) in [
        ("I/my", "ngo5"),
        ("Cat", "maau1"),
        ("recipe", "sik6 coeng2 / zaap6 fo3 pou3"),
        ("to eat", "sik6"),
    ] {
        repo.create_word(&Word::new(key, translation, today)).unwrap();
    }
    conn
}

#[test]
fn spaced_slash_query_resolves_to_compact_key() {
    let conn = seeded();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();
    let matcher = WordMatcher::new(&repo);

    assert_eq!(matcher.resolve_key("I / my").unwrap().as_deref(), Some("I/my"));
    assert_eq!(matcher.resolve_key("I/my").unwrap().as_deref(), Some("I/my"));
}

#[test]
fn case_and_padding_resolve_like_exact_match() {
    let conn = seeded();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();
    let matcher = WordMatcher::new(&repo);

    let exact = matcher.resolve("Cat").unwrap().unwrap();
    let loose = matcher.resolve("  cAT ").unwrap().unwrap();
    assert_eq!(exact.canonical_key(), "Cat");
    assert_eq!(loose.canonical_key(), "Cat");
    assert_eq!(loose.rule, MatchRule::ExactKey);
}

#[test]
fn translation_text_resolves_to_canonical_key() {
    let conn = seeded();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();
    let matcher = WordMatcher::new(&repo);

    let found = matcher.resolve("MAAU1").unwrap().unwrap();
    assert_eq!(found.canonical_key(), "Cat");
    assert_eq!(found.rule, MatchRule::ExactTranslation);
}

#[test]
fn compound_translation_matches_whole_or_any_part() {
    let conn = seeded();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();
    let matcher = WordMatcher::new(&repo);

    for query in [
        "sik6 coeng2 / zaap6 fo3 pou3",
        "sik6 coeng2/zaap6 fo3 pou3",
        "sik6 coeng2",
        "zaap6 fo3 pou3",
    ] {
        assert_eq!(
            matcher.resolve_key(query).unwrap().as_deref(),
            Some("recipe"),
            "query {query}"
        );
    }
}

#[test]
fn exact_translation_wins_over_alternative_part() {
    let conn = seeded();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();
    let matcher = WordMatcher::new(&repo);

    assert_eq!(matcher.resolve_key("sik6").unwrap().as_deref(), Some("to eat"));
}

#[test]
fn unknown_and_empty_queries_are_not_found() {
    let conn = seeded();
    let repo = SqliteWordRepository::try_new(&conn).unwrap();
    let matcher = WordMatcher::new(&repo);

    assert!(matcher.resolve("dog").unwrap().is_none());
    assert!(matcher.resolve("").unwrap().is_none());
    assert!(matcher.resolve("   ").unwrap().is_none());
}
