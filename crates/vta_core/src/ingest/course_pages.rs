use rusqlite::Connection;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::domain::{Collection, ValidationWarning};
use crate::error::AppError;
use crate::repo::{upsert_document, DocumentInput, UpsertOutcome};

use super::{canonical_created_at, ImportSummary};

/// One scraped course page. Pages carry no numeric id of their own, so a
/// stable one is derived from the url digest.
#[derive(Debug, Clone, Deserialize)]
struct CoursePage {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    scraped_at: String,
}

fn stable_id_from_url(url: &str) -> i64 {
    let digest = Sha256::digest(url.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    // Mask the sign bit so ids read like ordinary row ids.
    i64::from_be_bytes(bytes) & i64::MAX
}

/// Import scraped course pages into the `CourseContent` collection.
pub fn import_course_pages(conn: &Connection, json: &str) -> Result<ImportSummary, AppError> {
    let pages: Vec<CoursePage> = serde_json::from_str(json).map_err(|e| {
        AppError::new("INGEST_PARSE_FAILED", "Failed to parse course pages export")
            .with_details(e.to_string())
    })?;

    let mut summary = ImportSummary::default();

    for page in pages {
        if page.content.trim().is_empty() {
            summary.skipped += 1;
            summary.warnings.push(
                ValidationWarning::new("INGEST_CONTENT_EMPTY", "Skipped page with empty content")
                    .with_details(format!("url={}", page.url)),
            );
            continue;
        }

        if url::Url::parse(&page.url).is_err() {
            summary.skipped += 1;
            summary.warnings.push(
                ValidationWarning::new("INGEST_URL_INVALID", "Skipped page with malformed url")
                    .with_details(format!("url={}", page.url)),
            );
            continue;
        }

        let (created_at, created_at_raw) =
            canonical_created_at("scraped_at", &page.scraped_at, &mut summary.warnings);

        let outcome = upsert_document(
            conn,
            &DocumentInput {
                collection: Collection::CourseContent,
                id: stable_id_from_url(&page.url),
                title: page.title.trim().to_string(),
                content: page.content.trim().to_string(),
                url: page.url.clone(),
                section: page.section.clone(),
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
        "imported course pages"
    );

    Ok(summary)
}
