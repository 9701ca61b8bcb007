use thiserror::Error;

use crate::geometry::Region;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("No match for {target}. Required: {required}, given: {actual}")]
    NotFound {
        target: String,
        required: f64,
        actual: f64,
    },

    #[error("Failed to detect valid match for {text} with confidence {required} in {region}")]
    TextNotFound {
        text: String,
        required: f64,
        region: Region,
    },

    #[error("{context}. Reason: '{source}'")]
    Io {
        context: String,
        source: anyhow::Error,
    },

    #[error("Action timed out after {timeout_ms} ms. Last error: {last_error}")]
    Timeout { timeout_ms: u64, last_error: String },

    #[error("Failed to extract text from {0}")]
    EmptyResult(Region),

    #[error("Confidence must be within [0, 1], got {0}")]
    InvalidConfidence(f64),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Not available: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AutomationError {
    /// Wrap a collaborator failure with the reference that was being processed
    pub fn io(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AutomationError::Io {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AutomationError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, AutomationError>;
