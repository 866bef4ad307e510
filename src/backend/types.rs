//! Wire types for the backend's `/ask` and `/upload` endpoints.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// MIME type used when a file's type cannot be guessed.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Request body for `POST /ask`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskRequest {
    /// Trimmed question text.
    pub query: String,
}

/// Response body of `POST /ask`.
///
/// Both fields are optional: the backend answers `{ "answer": ... }` on
/// success and `{ "error": ... }` when its pipeline fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AskReply {
    /// The answer text, treating an empty string as absent.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.is_empty())
    }
}

/// Response body of `POST /upload`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadReply {
    /// Whether the backend confirmed the upload.
    pub fn is_success(&self) -> bool {
        self.message.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// The backend's error detail, treating an empty string as absent.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// A file selected or dropped by the user, held in memory for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name, as reported by the picker or drop.
    pub name: String,
    /// MIME type sent with the multipart part.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    /// Create a file from its parts.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Create a PDF file.
    pub fn pdf(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(name, "application/pdf", bytes)
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME);

        Ok(Self::new(name, content_type, bytes))
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
