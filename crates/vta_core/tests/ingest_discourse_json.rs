use vta_core::db;
use vta_core::domain::Collection;
use vta_core::ingest::discourse_json::import_discourse_export;
use vta_core::repo::get_document;

fn open_migrated() -> rusqlite::Connection {
    let mut conn = db::open_in_memory().expect("open");
    db::migrate(&mut conn).expect("migrate");
    conn
}

const EXPORT: &str = r#"[
  {
    "post_id": 101,
    "topic_title": "Model selection for GA5",
    "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/model-selection-for-ga5/101",
    "created_at": "2025-01-15T10:30:00.000Z",
    "raw_content": "Use gpt-3.5-turbo-0125 for this assignment.",
    "username": "carlton",
    "reply_count": 4
  },
  {
    "post_id": 102,
    "topic_title": "Empty post",
    "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/empty-post/102",
    "created_at": "2025-01-16T00:00:00Z",
    "raw_content": "   "
  },
  {
    "post_id": 103,
    "topic_title": "Naive timestamp",
    "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/naive-timestamp/103",
    "created_at": "2025-01-17 09:00:00",
    "raw_content": "Posted from a client without timezone info."
  },
  {
    "post_id": 104,
    "topic_title": "Broken link",
    "topic_url": "not a url",
    "created_at": "2025-01-18T00:00:00Z",
    "raw_content": "This one has a malformed topic url."
  }
]"#;

#[test]
fn imports_valid_posts_and_skips_invariant_violations() {
    let conn = open_migrated();
    let summary = import_discourse_export(&conn, EXPORT, "tds-kb").expect("import");

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 2);
    assert!(summary
        .warnings
        .iter()
        .any(|w| w.code == "INGEST_CONTENT_EMPTY"));
    assert!(summary
        .warnings
        .iter()
        .any(|w| w.code == "INGEST_URL_INVALID"));

    let post = get_document(&conn, Collection::ForumPosts, 101).expect("get");
    assert_eq!(post.title, "Model selection for GA5");
    assert_eq!(post.section.as_deref(), Some("tds-kb"));
    assert_eq!(post.created_at.as_deref(), Some("2025-01-15T10:30:00Z"));
    assert_eq!(post.created_at_raw, None);
}

#[test]
fn naive_timestamps_are_normalized_with_raw_preserved() {
    let conn = open_migrated();
    let summary = import_discourse_export(&conn, EXPORT, "tds-kb").expect("import");
    assert!(summary
        .warnings
        .iter()
        .any(|w| w.code == "INGEST_TS_ASSUMED_UTC"));

    let post = get_document(&conn, Collection::ForumPosts, 103).expect("get");
    assert_eq!(post.created_at.as_deref(), Some("2025-01-17T09:00:00Z"));
    assert_eq!(post.created_at_raw.as_deref(), Some("2025-01-17 09:00:00"));
}

#[test]
fn reimport_reports_unchanged_then_updated() {
    let conn = open_migrated();
    import_discourse_export(&conn, EXPORT, "tds-kb").expect("first");

    let again = import_discourse_export(&conn, EXPORT, "tds-kb").expect("second");
    assert_eq!(again.inserted, 0);
    assert_eq!(again.unchanged, 2);

    let edited = EXPORT.replace(
        "Use gpt-3.5-turbo-0125 for this assignment.",
        "Use gpt-3.5-turbo-0125 for this assignment. Updated with proxy notes.",
    );
    let third = import_discourse_export(&conn, &edited, "tds-kb").expect("third");
    assert_eq!(third.updated, 1);
    assert_eq!(third.unchanged, 1);
}

#[test]
fn malformed_export_fails_with_parse_error() {
    let conn = open_migrated();
    let err = import_discourse_export(&conn, "{not json", "tds-kb").expect_err("parse");
    assert_eq!(err.code, "INGEST_PARSE_FAILED");
}
