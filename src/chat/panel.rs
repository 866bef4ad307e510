//! The interactive chat panel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;
use tracing::{error, info, warn};

use super::alert::AlertSink;
use super::message::{Message, MessageId, Role, UploadedFileRecord};
use super::state::PanelState;
use crate::backend::{RagBackend, UploadFile};

/// Bot reply when the backend answers without an `answer`.
pub const NO_ANSWER: &str = "No answer received";

/// Bot reply when the ask request fails.
pub const SERVER_ERROR: &str = "Error contacting server";

/// Alert when the upload request fails.
pub const UPLOAD_ERROR: &str = "Error uploading file";

/// Detail used when a rejected upload carries no `error`.
pub const UNKNOWN_UPLOAD_ERROR: &str = "Unknown error";

/// How an upload ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The backend accepted the file and a record was appended.
    Recorded(UploadedFileRecord),
    /// The backend answered without `message`; carries the alert text.
    Rejected(String),
    /// The request itself failed; carries the alert text.
    Failed(String),
}

/// Files dropped onto the upload zone.
#[derive(Debug, Clone, Default)]
pub struct DropEvent {
    pub files: Vec<UploadFile>,
    default_prevented: bool,
}

impl DropEvent {
    pub fn new(files: Vec<UploadFile>) -> Self {
        Self {
            files,
            default_prevented: false,
        }
    }

    /// Stop the host from handling the drop itself (e.g. opening the file).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Chat panel: transcript, composer, uploads and the calls behind them.
///
/// Cloning is cheap and every clone drives the same state. Each mutation
/// bumps [`PanelState::revision`] and is published to [`subscribe`]rs after
/// the lock is released.
///
/// [`subscribe`]: ChatPanel::subscribe
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use rag_chat::backend::HttpBackend;
/// use rag_chat::chat::{AlertQueue, ChatPanel};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = Arc::new(HttpBackend::new("http://localhost:8000")?);
/// let panel = ChatPanel::new(backend, Arc::new(AlertQueue::new()));
///
/// panel.set_composer("What does chapter 2 cover?");
/// panel.send().await;
///
/// for message in panel.snapshot().messages {
///     println!("{}: {}", message.role, message.text);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChatPanel {
    inner: Arc<PanelInner>,
}

#[derive(Debug)]
struct PanelInner {
    backend: Arc<dyn RagBackend>,
    alerts: Arc<dyn AlertSink>,
    state: RwLock<PanelState>,
    next_id: AtomicU64,
    changes: watch::Sender<u64>,
}

/// Resets the loading flag when the ask settles, however it settles.
struct LoadingGuard<'a> {
    panel: &'a ChatPanel,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.panel.update(|state| state.loading = false);
    }
}

impl ChatPanel {
    /// Create an idle panel with an empty transcript.
    pub fn new(backend: Arc<dyn RagBackend>, alerts: Arc<dyn AlertSink>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(PanelInner {
                backend,
                alerts,
                state: RwLock::new(PanelState::default()),
                next_id: AtomicU64::new(1),
                changes,
            }),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> PanelState {
        self.read().clone()
    }

    /// Receiver that observes the revision after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    /// Whether an ask request is in flight.
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Replace the composer text.
    pub fn set_composer(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| state.composer = text);
    }

    /// Send the composer text as a question.
    ///
    /// Returns `false` without touching any state when the trimmed composer
    /// is empty. Otherwise the user message is appended before the request
    /// goes out, and exactly one bot message follows once it settles.
    pub async fn send(&self) -> bool {
        let query = {
            let mut state = self.write();
            let query = state.composer.trim().to_string();
            if query.is_empty() {
                return false;
            }
            let id = self.next_id();
            state.messages.push(Message::new(id, Role::User, query.clone()));
            state.composer.clear();
            state.loading = true;
            self.commit(state);
            query
        };

        let _loading = LoadingGuard { panel: self };

        info!(name: "chat.ask.started", query_len = query.len(), "Asking backend");
        let text = match self.inner.backend.ask(&query).await {
            Ok(reply) => reply.answer().unwrap_or(NO_ANSWER).to_string(),
            Err(e) => {
                warn!(name: "chat.ask.failed", error = %e, "Ask request failed");
                SERVER_ERROR.to_string()
            }
        };
        self.push_message(Role::Bot, text);

        true
    }

    /// Upload one file and record it if the backend accepts it.
    ///
    /// Rejections and failures raise an alert on the panel's [`AlertSink`].
    pub async fn upload(&self, file: UploadFile) -> UploadOutcome {
        let name = file.name.clone();
        info!(name: "chat.upload.started", file = %name, size = file.len(), "Uploading file");

        match self.inner.backend.upload(file).await {
            Ok(reply) if reply.is_success() => {
                let record = UploadedFileRecord::now(name);
                let stored = record.clone();
                self.update(|state| state.files.push(stored));
                UploadOutcome::Recorded(record)
            }
            Ok(reply) => {
                let detail = reply.error().unwrap_or(UNKNOWN_UPLOAD_ERROR);
                let text = format!("Upload failed: {detail}");
                warn!(name: "chat.upload.rejected", file = %name, detail = %detail, "Backend rejected upload");
                self.inner.alerts.alert(&text);
                UploadOutcome::Rejected(text)
            }
            Err(e) => {
                error!(name: "chat.upload.failed", file = %name, error = %e, "Upload failed");
                self.inner.alerts.alert(UPLOAD_ERROR);
                UploadOutcome::Failed(UPLOAD_ERROR.to_string())
            }
        }
    }

    /// Upload the first file of a picker selection; the rest are ignored.
    pub async fn on_file_change(
        &self,
        files: impl IntoIterator<Item = UploadFile>,
    ) -> Option<UploadOutcome> {
        let file = files.into_iter().next()?;
        Some(self.upload(file).await)
    }

    /// Upload the first dropped file; the rest are ignored.
    pub async fn on_drop(&self, event: &mut DropEvent) -> Option<UploadOutcome> {
        event.prevent_default();
        let file = std::mem::take(&mut event.files).into_iter().next()?;
        Some(self.upload(file).await)
    }

    fn next_id(&self) -> MessageId {
        MessageId(self.inner.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn push_message(&self, role: Role, text: String) -> MessageId {
        let id = self.next_id();
        self.update(|state| state.messages.push(Message::new(id, role, text)));
        id
    }

    fn update(&self, f: impl FnOnce(&mut PanelState)) {
        let mut state = self.write();
        f(&mut state);
        self.commit(state);
    }

    /// Bump the revision, release the lock, then notify subscribers.
    fn commit(&self, mut state: RwLockWriteGuard<'_, PanelState>) {
        state.revision += 1;
        let revision = state.revision;
        drop(state);
        self.inner.changes.send_replace(revision);
    }

    fn read(&self) -> RwLockReadGuard<'_, PanelState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PanelState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AskReply, UploadReply};
    use crate::chat::AlertQueue;
    use crate::error::{ClientError, Result};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Answers every question with `answer` once `gate` is notified.
    #[derive(Debug, Default)]
    struct GatedBackend {
        gate: Notify,
    }

    #[async_trait]
    impl RagBackend for GatedBackend {
        async fn ask(&self, query: &str) -> Result<AskReply> {
            self.gate.notified().await;
            Ok(AskReply {
                answer: Some(format!("re: {query}")),
                error: None,
            })
        }

        async fn upload(&self, _file: UploadFile) -> Result<UploadReply> {
            Err(ClientError::Io(std::io::Error::other("offline")))
        }
    }

    fn panel(backend: Arc<GatedBackend>) -> ChatPanel {
        ChatPanel::new(backend, Arc::new(AlertQueue::new()))
    }

    #[tokio::test]
    async fn test_loading_while_in_flight() {
        let backend = Arc::new(GatedBackend::default());
        let panel = panel(Arc::clone(&backend));
        panel.set_composer("  hello  ");

        let task = tokio::spawn({
            let panel = panel.clone();
            async move { panel.send().await }
        });

        let mut changes = panel.subscribe();
        changes.wait_for(|_| panel.is_loading()).await.unwrap();

        let state = panel.snapshot();
        assert!(state.loading);
        assert_eq!(state.composer, "");
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].text, "hello");

        backend.gate.notify_one();
        assert!(task.await.unwrap());

        let state = panel.snapshot();
        assert!(!state.loading);
        assert_eq!(state.messages[1].role, Role::Bot);
        assert_eq!(state.messages[1].text, "re: hello");
    }

    #[tokio::test]
    async fn test_cancelled_send_resets_loading() {
        let backend = Arc::new(GatedBackend::default());
        let panel = panel(backend);
        panel.set_composer("never answered");

        let task = tokio::spawn({
            let panel = panel.clone();
            async move { panel.send().await }
        });

        let mut changes = panel.subscribe();
        changes.wait_for(|_| panel.is_loading()).await.unwrap();

        task.abort();
        let _ = task.await;

        tokio::time::timeout(Duration::from_secs(1), changes.wait_for(|_| !panel.is_loading()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(panel.snapshot().messages.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_strictly_increasing() {
        let backend = Arc::new(GatedBackend::default());
        backend.gate.notify_one();
        let panel = panel(Arc::clone(&backend));

        panel.set_composer("first");
        panel.send().await;
        backend.gate.notify_one();
        panel.set_composer("second");
        panel.send().await;

        let ids: Vec<_> = panel.snapshot().messages.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_every_mutation_bumps_revision() {
        let panel = panel(Arc::new(GatedBackend::default()));
        let rx = panel.subscribe();
        let before = panel.snapshot().revision;

        panel.set_composer("draft");

        assert_eq!(panel.snapshot().revision, before + 1);
        assert_eq!(*rx.borrow(), before + 1);
    }

    #[tokio::test]
    async fn test_drop_prevents_default_even_when_empty() {
        let panel = panel(Arc::new(GatedBackend::default()));
        let mut event = DropEvent::new(Vec::new());

        assert!(panel.on_drop(&mut event).await.is_none());
        assert!(event.default_prevented());
    }
}
