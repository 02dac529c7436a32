use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use vta_core::error::AppError;
use vta_core::store::KnowledgeStore;

use crate::answer::{answer_question, Link};
use crate::llm::Llm;
use crate::ocr::Ocr;

/// The request shape a transport layer deserializes from the student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Optional image attachment, base64-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub answer: String,
    pub links: Vec<Link>,
}

/// The only hard-error surface in the system. A blank question or an
/// undecodable image is malformed input (`INVALID_REQUEST`, an HTTP 400 at
/// the transport); every downstream failure is absorbed into a valid,
/// possibly degraded, response.
pub fn handle_ask(
    store: &dyn KnowledgeStore,
    llm: &dyn Llm,
    ocr: &dyn Ocr,
    req: &AskRequest,
) -> Result<AskResponse, AppError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::new(
            "INVALID_REQUEST",
            "Question must not be empty",
        ));
    }

    let image = match req.image.as_deref() {
        Some(encoded) => Some(BASE64.decode(encoded.trim()).map_err(|e| {
            AppError::new("INVALID_REQUEST", "Image is not valid base64")
                .with_details(e.to_string())
        })?),
        None => None,
    };

    let answer = answer_question(store, llm, ocr, question, image.as_deref());
    Ok(AskResponse {
        answer: answer.text,
        links: answer.links,
    })
}
