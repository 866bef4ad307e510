//! Shared test utilities.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rag_chat::backend::{AskReply, RagBackend, UploadFile, UploadReply};
use rag_chat::chat::{AlertQueue, ChatPanel};
use rag_chat::error::{ClientError, Result};
use serde_json::Value;

/// Backend that replays scripted replies in order.
///
/// When a queue runs dry it answers with an empty JSON object.
#[derive(Debug, Default)]
pub struct MockBackend {
    asks: Mutex<VecDeque<Result<AskReply>>>,
    uploads: Mutex<VecDeque<Result<UploadReply>>>,
    queries: Mutex<Vec<String>>,
    uploaded: Mutex<Vec<UploadFile>>,
}

fn connection_refused() -> ClientError {
    ClientError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an ask reply decoded from `body`.
    pub fn with_ask(self, body: Value) -> Self {
        let reply = serde_json::from_value(body).expect("valid ask reply");
        self.asks.lock().unwrap().push_back(Ok(reply));
        self
    }

    /// Queue a transport failure for the next ask.
    pub fn with_ask_failure(self) -> Self {
        self.asks.lock().unwrap().push_back(Err(connection_refused()));
        self
    }

    /// Queue an upload reply decoded from `body`.
    pub fn with_upload(self, body: Value) -> Self {
        let reply = serde_json::from_value(body).expect("valid upload reply");
        self.uploads.lock().unwrap().push_back(Ok(reply));
        self
    }

    /// Queue a transport failure for the next upload.
    pub fn with_upload_failure(self) -> Self {
        self.uploads
            .lock()
            .unwrap()
            .push_back(Err(connection_refused()));
        self
    }

    /// Questions received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Names of files received so far.
    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploaded
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }
}

#[async_trait]
impl RagBackend for MockBackend {
    async fn ask(&self, query: &str) -> Result<AskReply> {
        self.queries.lock().unwrap().push(query.to_string());
        let next = self.asks.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(AskReply::default()))
    }

    async fn upload(&self, file: UploadFile) -> Result<UploadReply> {
        self.uploaded.lock().unwrap().push(file);
        let next = self.uploads.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(UploadReply::default()))
    }
}

/// A panel over `backend`, with its alerts collected in a queue.
pub fn panel_with(backend: MockBackend) -> (ChatPanel, Arc<MockBackend>, AlertQueue) {
    let backend = Arc::new(backend);
    let alerts = AlertQueue::new();
    let panel = ChatPanel::new(
        Arc::clone(&backend) as Arc<dyn RagBackend>,
        Arc::new(alerts.clone()),
    );
    (panel, backend, alerts)
}

/// A small PDF-looking file.
pub fn pdf(name: &str) -> UploadFile {
    UploadFile::pdf(name, b"%PDF-1.4\n".to_vec())
}
