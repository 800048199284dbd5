//! Error types for Outcall
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Outcall
#[derive(Debug, Error)]
pub enum OutcallError {
    /// Tool name is not in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// `number` argument absent or blank
    #[error("Phone number is required")]
    MissingNumber,

    /// `patient_id` argument absent or blank
    #[error("Patient ID is required")]
    MissingIdentifier,

    /// Outbound call API answered with a non-success status
    #[error("API call failed: {status} {status_text} - {body}")]
    ExternalApi {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Outbound call API could not be reached or its reply could not be read
    #[error("API request failed: {0}")]
    Transport(String),

    /// Configuration or reference data error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutcallError {
    /// Errors produced by the external call API, either by status or transport
    pub fn is_external(&self) -> bool {
        matches!(self, Self::ExternalApi { .. } | Self::Transport(_))
    }
}

impl From<reqwest::Error> for OutcallError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(error_chain(&err))
    }
}

/// Render an error followed by each of its causes, skipping causes already in the text
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Result type alias for Outcall operations
pub type Result<T> = std::result::Result<T, OutcallError>;
