//! HTTP implementation of [`RagBackend`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use url::Url;

use super::{AskReply, AskRequest, RagBackend, UploadFile, UploadReply};
use crate::error::{ClientError, Result};

/// Multipart field name the backend reads the document from.
const UPLOAD_FIELD: &str = "file";

/// reqwest-backed client for the RAG backend.
///
/// # Example
///
/// ```rust,no_run
/// use rag_chat::backend::{HttpBackend, RagBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:8000")?;
/// let reply = backend.ask("What is in the report?").await?;
/// println!("{:?}", reply.answer());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Decode a JSON body without looking at the status code.
    ///
    /// A non-2xx response that still carries JSON is interpreted by shape,
    /// like any other reply.
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Backend replied with non-success status");
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RagBackend for HttpBackend {
    async fn ask(&self, query: &str) -> Result<AskReply> {
        let req = AskRequest {
            query: query.to_string(),
        };
        let response = self.http.post(self.url("ask")?).json(&req).send().await?;
        Self::decode(response).await
    }

    async fn upload(&self, file: UploadFile) -> Result<UploadReply> {
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.content_type)
            .map_err(|e| ClientError::InvalidUpload(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.url("upload")?)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }
}
