use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{format_description, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::domain::ValidationWarning;

pub mod course_pages;
pub mod discourse_json;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub warnings: Vec<ValidationWarning>,
}

/// Canonicalized ingest timestamp: `(canonical RFC3339 UTC, preserved raw)`.
///
/// - RFC3339 input: canonical only, raw dropped.
/// - `YYYY-MM-DD HH:MM[:SS]`-style input: assumed UTC with an explicit
///   warning, raw preserved.
/// - Anything else: canonical stays `None`, raw preserved, warning emitted.
pub(crate) fn canonical_created_at(
    field: &str,
    raw_input: &str,
    warnings: &mut Vec<ValidationWarning>,
) -> (Option<String>, Option<String>) {
    let trimmed = raw_input.trim();
    if trimmed.is_empty() {
        return (None, None);
    }

    if let Ok(dt) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return (canonical_rfc3339_utc(dt), None);
    }

    // Deterministic allowlist only, no fuzzy parsing.
    for fmt in [
        "[year]-[month]-[day] [hour]:[minute]:[second]",
        "[year]-[month]-[day]T[hour]:[minute]:[second]",
        "[year]-[month]-[day] [hour]:[minute]",
    ] {
        let Ok(items) = format_description::parse(fmt) else {
            continue;
        };
        if let Ok(pdt) = PrimitiveDateTime::parse(trimmed, &items) {
            warnings.push(
                ValidationWarning::new(
                    "INGEST_TS_ASSUMED_UTC",
                    format!("Assumed UTC timezone for {field}"),
                )
                .with_details(format!("value={trimmed}")),
            );
            return (
                canonical_rfc3339_utc(pdt.assume_utc()),
                Some(trimmed.to_string()),
            );
        }
    }

    warnings.push(
        ValidationWarning::new(
            "INGEST_TS_UNPARSEABLE",
            format!("Unparseable timestamp for {field}; preserved raw"),
        )
        .with_details(format!("raw={trimmed}")),
    );
    (None, Some(trimmed.to_string()))
}

fn canonical_rfc3339_utc(dt: OffsetDateTime) -> Option<String> {
    dt.to_offset(UtcOffset::UTC).format(&Rfc3339).ok()
}
