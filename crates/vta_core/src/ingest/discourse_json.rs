use rusqlite::Connection;
use serde::Deserialize;

use crate::domain::{Collection, ValidationWarning};
use crate::error::AppError;
use crate::repo::{upsert_document, DocumentInput, UpsertOutcome};

use super::{canonical_created_at, ImportSummary};

/// One post from the Discourse scraper's JSON export. Unknown fields in the
/// export (vote counts, view counts, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
struct DiscoursePost {
    post_id: i64,
    #[serde(default)]
    topic_title: String,
    #[serde(default)]
    topic_url: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    raw_content: String,
}

/// Import a Discourse export into the `ForumPosts` collection.
///
/// `category` is the forum category slug recorded as each document's section.
/// Rows violating document invariants (empty content, malformed url) are
/// skipped with a warning rather than failing the whole import.
pub fn import_discourse_export(
    conn: &Connection,
    json: &str,
    category: &str,
) -> Result<ImportSummary, AppError> {
    let posts: Vec<DiscoursePost> = serde_json::from_str(json).map_err(|e| {
        AppError::new("INGEST_PARSE_FAILED", "Failed to parse Discourse export")
            .with_details(e.to_string())
    })?;

    let mut summary = ImportSummary::default();

    for post in posts {
        if post.raw_content.trim().is_empty() {
            summary.skipped += 1;
            summary.warnings.push(
                ValidationWarning::new("INGEST_CONTENT_EMPTY", "Skipped post with empty content")
                    .with_details(format!("post_id={}", post.post_id)),
            );
            continue;
        }

        if url::Url::parse(&post.topic_url).is_err() {
            summary.skipped += 1;
            summary.warnings.push(
                ValidationWarning::new("INGEST_URL_INVALID", "Skipped post with malformed url")
                    .with_details(format!("post_id={}; url={}", post.post_id, post.topic_url)),
            );
            continue;
        }

        let (created_at, created_at_raw) =
            canonical_created_at("created_at", &post.created_at, &mut summary.warnings);

        let outcome = upsert_document(
            conn,
            &DocumentInput {
                collection: Collection::ForumPosts,
                id: post.post_id,
                title: post.topic_title.trim().to_string(),
                content: post.raw_content.trim().to_string(),
                url: post.topic_url.clone(),
                section: Some(category.to_string()),
                created_at,
                created_at_raw,
            },
        )?;

        match outcome {
            UpsertOutcome::Inserted => summary.inserted += 1,
            UpsertOutcome::Updated => summary.updated += 1,
            UpsertOutcome::Unchanged => summary.unchanged += 1,
        }
    }

    tracing::info!(
        inserted = summary.inserted,
        updated = summary.updated,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        "imported Discourse export"
    );

    Ok(summary)
}
