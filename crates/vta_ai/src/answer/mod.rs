use serde::{Deserialize, Serialize};

use vta_core::store::KnowledgeStore;

use crate::llm::Llm;
use crate::ocr::Ocr;
use crate::prompt::PromptBuilder;
use crate::retrieve::{self, DocumentMatch, DEFAULT_TOP_K};

/// Served when the upstream model cannot be reached or misbehaves.
pub const FALLBACK_ANSWER: &str = "Sorry, I am unable to answer this right now. Please try again \
in a little while, or post your question on the course forum.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub links: Vec<Link>,
}

/// Citation links for the matches packed into the prompt, in rank order.
/// De-duplicated by url; the first (highest-ranked) hit keeps the slot.
pub fn links_for_matches(included: &[DocumentMatch]) -> Vec<Link> {
    let mut links: Vec<Link> = Vec::new();
    for m in included {
        if links.iter().any(|l| l.url == m.document.url) {
            continue;
        }
        links.push(Link {
            url: m.document.url.clone(),
            text: m.document.title.clone(),
        });
    }
    links
}

pub fn format_answer(raw: &str, included: &[DocumentMatch]) -> Answer {
    Answer {
        text: raw.trim().to_string(),
        links: links_for_matches(included),
    }
}

pub fn degraded_answer() -> Answer {
    Answer {
        text: FALLBACK_ANSWER.to_string(),
        links: Vec::new(),
    }
}

/// The full question-answering pipeline: OCR text joins the question, the
/// store is read and ranked, matches are packed into a bounded prompt, the
/// model is called, and links are derived from the packed matches.
///
/// Every core-level failure is absorbed into a still-valid answer: an
/// unreadable store degrades to a contextless prompt, a failed or blank
/// completion degrades to the static fallback. Only the transport boundary
/// may reject a request, and only for malformed input.
pub fn answer_question(
    store: &dyn KnowledgeStore,
    llm: &dyn Llm,
    ocr: &dyn Ocr,
    question: &str,
    image: Option<&[u8]>,
) -> Answer {
    let mut effective_question = question.trim().to_string();
    if let Some(bytes) = image {
        let extracted = ocr.extract_text(bytes);
        if !extracted.trim().is_empty() {
            effective_question.push_str("\n\n");
            effective_question.push_str(extracted.trim());
        }
    }

    let matches = match retrieve::retrieve_matches(store, &effective_question, DEFAULT_TOP_K) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(code = %e.code, "knowledge store unavailable; answering without context");
            Vec::new()
        }
    };

    let assembled = PromptBuilder::default().assemble(&effective_question, &matches);

    match llm.complete(&assembled.prompt) {
        Ok(raw) => {
            let answer = format_answer(&raw, &assembled.included);
            if answer.text.is_empty() {
                tracing::warn!("completion returned blank text; serving fallback answer");
                return degraded_answer();
            }
            tracing::info!(links = answer.links.len(), "answered question");
            answer
        }
        Err(e) => {
            tracing::warn!(code = %e.code, "completion failed; serving fallback answer");
            degraded_answer()
        }
    }
}
