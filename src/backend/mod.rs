//! RAG backend client.
//!
//! The backend is an external service that answers questions over indexed
//! PDFs and ingests new ones. This module only knows its HTTP contract:
//!
//! - `POST /ask` with `{ "query": ... }`, answered by `{ "answer": ... }`
//! - `POST /upload` with a multipart `file` field, answered by `{ "message": ... }`
//!
//! # Structure
//!
//! - [`RagBackend`]: the seam the chat panel talks through
//! - [`HttpBackend`]: reqwest implementation
//! - [`types`]: request/response bodies and [`UploadFile`]

mod http;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use http::HttpBackend;
pub use types::{AskReply, AskRequest, UploadFile, UploadReply};

/// A question-answering backend that also accepts document uploads.
///
/// Implementations return the decoded reply regardless of HTTP status; an
/// `Err` means the request could not be completed or its body was not JSON.
#[async_trait]
pub trait RagBackend: Send + Sync + std::fmt::Debug {
    /// Ask a question.
    async fn ask(&self, query: &str) -> Result<AskReply>;

    /// Upload a document for indexing.
    async fn upload(&self, file: UploadFile) -> Result<UploadReply>;
}
