//! Error types for backend calls.

use thiserror::Error;

/// Errors raised while talking to the RAG backend.
///
/// The chat panel never surfaces these directly; they are logged and turned
/// into plain-text transcript entries or alerts.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed or the body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid backend URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be packed into a multipart form.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, ClientError>;
