use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::domain::{Collection, Document, ValidationWarning};
use crate::error::AppError;

/// Validate a document against store invariants: non-empty content,
/// well-formed url, canonical timestamp. Violations are warnings, never
/// errors; the pipeline keeps serving whatever is in the store.
pub fn validate_document(document: &Document) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if document.content.trim().is_empty() {
        warnings.push(
            ValidationWarning::new("VALIDATION_CONTENT_EMPTY", "Document content is empty")
                .with_details(format!(
                    "collection={}; id={}",
                    document.collection.as_str(),
                    document.id
                )),
        );
    }

    if let Err(e) = url::Url::parse(&document.url) {
        warnings.push(
            ValidationWarning::new("VALIDATION_URL_INVALID", "Document url is malformed")
                .with_details(format!("url={}; err={}", document.url, e)),
        );
    }

    match document.created_at.as_deref() {
        Some(ts) => {
            if OffsetDateTime::parse(ts, &Rfc3339).is_err() {
                warnings.push(
                    ValidationWarning::new(
                        "VALIDATION_TS_PARSE_FAILED",
                        "Document created_at is not canonical RFC3339",
                    )
                    .with_details(format!("value={ts}")),
                );
            }
        }
        None => {
            if let Some(raw) = document.created_at_raw.as_deref() {
                warnings.push(
                    ValidationWarning::new(
                        "VALIDATION_TS_RAW_PRESENT",
                        "Non-canonical timestamp preserved; canonical is UNKNOWN",
                    )
                    .with_details(format!("raw={raw}")),
                );
            }
        }
    }

    warnings
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentValidationReportItem {
    pub collection: Collection,
    pub id: i64,
    pub title: String,
    pub warnings: Vec<ValidationWarning>,
}

pub fn validate_all_documents(
    conn: &Connection,
) -> Result<Vec<DocumentValidationReportItem>, AppError> {
    let documents = crate::repo::list_documents(conn, None)?;
    let mut out = Vec::new();

    for doc in documents {
        let warnings = validate_document(&doc);
        out.push(DocumentValidationReportItem {
            collection: doc.collection,
            id: doc.id,
            title: doc.title,
            warnings,
        });
    }

    // Deterministic ordering.
    out.sort_by(|a, b| (a.collection, a.id).cmp(&(b.collection, b.id)));

    Ok(out)
}
