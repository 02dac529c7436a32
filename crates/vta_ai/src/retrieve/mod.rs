use serde::{Deserialize, Serialize};

use vta_core::domain::Document;
use vta_core::error::AppError;
use vta_core::store::KnowledgeStore;

pub mod scoring;

/// Number of ranked matches handed to prompt assembly.
pub const DEFAULT_TOP_K: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMatch {
    pub document: Document,
    pub score: u32,
}

/// Rank documents against a question and keep the top `top_k`.
///
/// Zero-score documents are excluded. Ordering is total and deterministic:
/// score desc, then created_at desc with missing timestamps last, then
/// `(collection, id)` asc. An empty or stopword-only question ranks nothing.
pub fn rank_documents(question: &str, documents: &[Document], top_k: usize) -> Vec<DocumentMatch> {
    let terms = scoring::tokenize(question);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<DocumentMatch> = documents
        .iter()
        .filter_map(|document| {
            let score = scoring::score_document(&terms, document);
            (score > 0).then(|| DocumentMatch {
                document: document.clone(),
                score,
            })
        })
        .collect();

    // Canonical RFC3339 UTC strings order chronologically as plain strings.
    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.document.created_at.cmp(&a.document.created_at))
            .then_with(|| {
                (a.document.collection, a.document.id).cmp(&(b.document.collection, b.document.id))
            })
    });
    matches.truncate(top_k);
    matches
}

/// Read the store and rank. An unreadable store surfaces as
/// `STORE_UNAVAILABLE`; callers degrade to a contextless prompt.
pub fn retrieve_matches(
    store: &dyn KnowledgeStore,
    question: &str,
    top_k: usize,
) -> Result<Vec<DocumentMatch>, AppError> {
    let documents = store.list_documents(None)?;
    Ok(rank_documents(question, &documents, top_k))
}
