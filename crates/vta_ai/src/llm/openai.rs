use std::time::Duration;

use serde::{Deserialize, Serialize};

use vta_core::error::AppError;

use super::Llm;

/// Bound on a single completion call; a hung upstream becomes a degraded
/// answer, never a hanging request.
const COMPLETE_TIMEOUT: Duration = Duration::from_secs(30);
/// Pause before the single transport-level retry.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);
const HEALTH_TIMEOUT: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl OpenAiConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = std::env::var("VTA_OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = std::env::var("VTA_OPENAI_API_KEY").map_err(|_| {
            AppError::new("LLM_CONFIG_INVALID", "VTA_OPENAI_API_KEY is not set")
        })?;
        let model =
            std::env::var("VTA_OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        Ok(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Blocking client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiLlm {
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiLlm {
    pub fn new(config: OpenAiConfig) -> Result<Self, AppError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(
                AppError::new("LLM_CONFIG_INVALID", "LLM base URL must be http or https")
                    .with_details(format!("base_url={base_url}")),
            );
        }
        if config.api_key.trim().is_empty() {
            return Err(AppError::new(
                "LLM_CONFIG_INVALID",
                "LLM API key must not be empty",
            ));
        }
        if config.model.trim().is_empty() {
            return Err(AppError::new(
                "LLM_CONFIG_INVALID",
                "LLM model must not be empty",
            ));
        }
        Ok(Self {
            base_url,
            api_key: config.api_key,
            model: config.model,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health_check(&self) -> Result<(), AppError> {
        let url = format!("{}/models", self.base_url);
        let resp = ureq::get(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(HEALTH_TIMEOUT)
            .call();

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(
                AppError::new("LLM_UPSTREAM_FAILED", "Upstream health check failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new("LLM_UPSTREAM_FAILED", "Failed to reach upstream")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }

    fn request_once(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        let req = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let resp = ureq::post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(COMPLETE_TIMEOUT)
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("LLM_UPSTREAM_FAILED", "Failed to encode completion request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: ChatResponse = r.into_json().map_err(|e| {
                    AppError::new("LLM_UPSTREAM_FAILED", "Failed to decode completion response")
                        .with_details(e.to_string())
                })?;
                let content = v
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message.content)
                    .unwrap_or_default();
                if content.trim().is_empty() {
                    return Err(AppError::new(
                        "LLM_UPSTREAM_FAILED",
                        "Completion response was empty",
                    ));
                }
                Ok(content)
            }
            Ok(r) => Err(
                AppError::new("LLM_UPSTREAM_FAILED", "Completion request failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new("LLM_UPSTREAM_FAILED", "Failed to call completion endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl Llm for OpenAiLlm {
    fn complete(&self, prompt: &str) -> Result<String, AppError> {
        match self.request_once(prompt) {
            Err(e) if e.retryable => {
                tracing::warn!(code = %e.code, "completion call failed; retrying once");
                std::thread::sleep(RETRY_BACKOFF);
                self.request_once(prompt)
            }
            other => other,
        }
    }
}
