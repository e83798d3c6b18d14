//! Submission errors

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single submission attempt
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Endpoint answered with a non-2xx status
    #[error("server responded with HTTP {status}")]
    Status { status: StatusCode, body: String },

    /// Request never completed (DNS, connect, TLS, reset, ...)
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A selected file could not be read for the multipart body
    #[error("could not read \"{name}\": {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SubmitError {
    /// HTTP status of the failure, if the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
