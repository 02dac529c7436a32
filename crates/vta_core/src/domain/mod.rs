use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// The two logical collections served by the knowledge store. Documents share
/// one shape; the collection scopes id uniqueness and marks provenance.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    ForumPosts,
    CourseContent,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::ForumPosts => "forum_posts",
            Collection::CourseContent => "course_content",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "forum_posts" => Some(Collection::ForumPosts),
            "course_content" => Some(Collection::CourseContent),
            _ => None,
        }
    }
}

impl ToSql for Collection {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Collection {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Collection::parse(s).ok_or(FromSqlError::InvalidType)
    }
}

/// A stored knowledge-base document (forum post or course page).
///
/// Notes:
/// - `created_at` is canonical RFC3339 UTC. When ingest cannot canonicalize a
///   source timestamp, the original value is preserved in `created_at_raw` and
///   validators surface a warning (no silent guessing).
/// - `fingerprint` is a sha256 digest over the document payload, used by
///   ingest to decide inserted/updated/unchanged on re-import.
/// - Read-only during query handling; only ingest writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub collection: Collection,
    pub id: i64,
    pub title: String,
    pub content: String,
    pub url: String,
    pub section: Option<String>,
    pub created_at: Option<String>,
    pub created_at_raw: Option<String>,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationWarning {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl ValidationWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
