use vta_core::error::AppError;

mod openai;

pub use openai::{OpenAiConfig, OpenAiLlm};

/// Text-completion collaborator. The answer pipeline treats any failure here
/// as a degraded-answer condition, never a hard error.
pub trait Llm {
    fn complete(&self, prompt: &str) -> Result<String, AppError>;
}
