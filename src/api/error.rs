//! Errors returned by the forms server client

use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// One-line form for the status bar
    pub fn summary(&self) -> String {
        match self {
            Self::Status { status, .. } => format!("server returned {status}"),
            Self::Network(e) if e.is_timeout() => "request timed out".to_string(),
            Self::Network(_) => "could not reach server".to_string(),
            Self::InvalidUrl(e) => format!("invalid server url: {e}"),
            Self::Decode(_) => "unexpected response from server".to_string(),
        }
    }
}
