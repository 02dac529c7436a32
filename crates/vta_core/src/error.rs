use serde::{Deserialize, Serialize};
use std::fmt;

/// Single structured error shape shared by both crates and exposed to callers.
///
/// `code` is a stable machine-readable identifier; `retryable` marks transient
/// upstream conditions a caller may reasonably try again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = self.details.as_deref() {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}
