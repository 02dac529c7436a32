use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{Collection, Document};
use crate::error::AppError;

/// Write-side input for a document. The fingerprint is computed here so every
/// writer (ingest, demo seed) shares one identity rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentInput {
    pub collection: Collection,
    pub id: i64,
    pub title: String,
    pub content: String,
    pub url: String,
    pub section: Option<String>,
    pub created_at: Option<String>,
    pub created_at_raw: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSummary {
    pub forum_posts: i64,
    pub course_content: i64,
    pub latest_created_at: Option<String>,
}

fn fingerprint(input: &DocumentInput) -> String {
    let payload = format!(
        "title={}|content={}|url={}|section={}|created_at={}|created_at_raw={}",
        input.title,
        input.content,
        input.url,
        input.section.as_deref().unwrap_or(""),
        input.created_at.as_deref().unwrap_or(""),
        input.created_at_raw.as_deref().unwrap_or("")
    );
    let digest = Sha256::digest(payload.as_bytes());
    hex::encode(digest)
}

fn row_to_document(row: &Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        collection: row.get(0)?,
        id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        url: row.get(4)?,
        section: row.get(5)?,
        created_at: row.get(6)?,
        created_at_raw: row.get(7)?,
        fingerprint: row.get(8)?,
    })
}

const DOCUMENT_COLUMNS: &str =
    "collection, id, title, content, url, section, created_at, created_at_raw, fingerprint";

/// List documents, newest first (missing timestamps last), scoped to one
/// collection when a filter is given.
pub fn list_documents(
    conn: &Connection,
    collection: Option<Collection>,
) -> Result<Vec<Document>, AppError> {
    let sql = match collection {
        Some(_) => format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE collection = ?1 \
             ORDER BY (created_at IS NULL) ASC, created_at DESC, id ASC"
        ),
        None => format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents \
             ORDER BY (created_at IS NULL) ASC, created_at DESC, collection ASC, id ASC"
        ),
    };

    let mut stmt = conn.prepare(&sql).map_err(|e| {
        AppError::new("DB_QUERY_FAILED", "Failed to prepare documents query")
            .with_details(e.to_string())
    })?;

    let rows = match collection {
        Some(c) => stmt.query_map([c], row_to_document),
        None => stmt.query_map([], row_to_document),
    }
    .map_err(|e| {
        AppError::new("DB_QUERY_FAILED", "Failed to query documents").with_details(e.to_string())
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| {
            AppError::new("DB_QUERY_FAILED", "Failed to decode document row")
                .with_details(e.to_string())
        })?);
    }

    Ok(out)
}

pub fn get_document(
    conn: &Connection,
    collection: Collection,
    id: i64,
) -> Result<Document, AppError> {
    let sql = format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE collection = ?1 AND id = ?2"
    );
    conn.query_row(&sql, rusqlite::params![collection, id], row_to_document)
        .map_err(|e| {
            AppError::new("DB_NOT_FOUND", "Document not found").with_details(e.to_string())
        })
}

pub fn count_documents(
    conn: &Connection,
    collection: Option<Collection>,
) -> Result<i64, AppError> {
    let result = match collection {
        Some(c) => conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            [c],
            |row| row.get(0),
        ),
        None => conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0)),
    };
    result.map_err(|e| {
        AppError::new("DB_QUERY_FAILED", "Failed to count documents").with_details(e.to_string())
    })
}

/// Insert or update a document keyed by `(collection, id)`, comparing
/// fingerprints to avoid rewriting unchanged rows.
pub fn upsert_document(
    conn: &Connection,
    input: &DocumentInput,
) -> Result<UpsertOutcome, AppError> {
    let fp = fingerprint(input);

    let existing: Option<String> = conn
        .query_row(
            "SELECT fingerprint FROM documents WHERE collection = ?1 AND id = ?2",
            rusqlite::params![input.collection, input.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| {
            AppError::new("DB_QUERY_FAILED", "Failed to look up existing document")
                .with_details(e.to_string())
        })?;

    match existing {
        None => {
            conn.execute(
                r#"
          INSERT INTO documents
            (collection, id, title, content, url, section, created_at, created_at_raw, fingerprint)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
          "#,
                rusqlite::params![
                    input.collection,
                    input.id,
                    input.title,
                    input.content,
                    input.url,
                    input.section,
                    input.created_at,
                    input.created_at_raw,
                    fp,
                ],
            )
            .map_err(|e| {
                AppError::new("DB_INSERT_FAILED", "Failed to insert document")
                    .with_details(e.to_string())
            })?;
            Ok(UpsertOutcome::Inserted)
        }
        Some(old) if old == fp => Ok(UpsertOutcome::Unchanged),
        Some(_) => {
            conn.execute(
                r#"
          UPDATE documents
          SET title = ?3, content = ?4, url = ?5, section = ?6,
              created_at = ?7, created_at_raw = ?8, fingerprint = ?9
          WHERE collection = ?1 AND id = ?2
          "#,
                rusqlite::params![
                    input.collection,
                    input.id,
                    input.title,
                    input.content,
                    input.url,
                    input.section,
                    input.created_at,
                    input.created_at_raw,
                    fp,
                ],
            )
            .map_err(|e| {
                AppError::new("DB_UPDATE_FAILED", "Failed to update document")
                    .with_details(e.to_string())
            })?;
            Ok(UpsertOutcome::Updated)
        }
    }
}

pub fn store_summary(conn: &Connection) -> Result<StoreSummary, AppError> {
    let forum_posts = count_documents(conn, Some(Collection::ForumPosts))?;
    let course_content = count_documents(conn, Some(Collection::CourseContent))?;
    let latest_created_at: Option<String> = conn
        .query_row("SELECT MAX(created_at) FROM documents", [], |row| {
            row.get(0)
        })
        .map_err(|e| {
            AppError::new("DB_QUERY_FAILED", "Failed to read latest document timestamp")
                .with_details(e.to_string())
        })?;

    Ok(StoreSummary {
        forum_posts,
        course_content,
        latest_created_at,
    })
}
