//! Failures on the live prediction path.
//!
//! None of these reach callers of `PredictionService`; they are absorbed into
//! a mock result and reported through `PredictionSource::Fallback`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("no API key configured for the AI backend")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for PredictionError {
    fn from(e: reqwest::Error) -> Self {
        PredictionError::Network(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PredictionError>;
