//! Alert delivery for upload failures.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

/// Receives user-facing alerts raised by the chat panel.
pub trait AlertSink: Send + Sync + std::fmt::Debug {
    fn alert(&self, text: &str);
}

/// Collects alerts in memory until drained.
#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    inner: Arc<Mutex<Vec<String>>>,
}

impl AlertQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every alert raised so far.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    /// Copy of the pending alerts.
    pub fn pending(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl AlertSink for AlertQueue {
    fn alert(&self, text: &str) {
        self.lock().push(text.to_string());
    }
}

/// Writes alerts to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalAlerts;

impl AlertSink for TerminalAlerts {
    fn alert(&self, text: &str) {
        eprintln!("[alert] {text}");
    }
}

/// Fans alerts out to every connected browser.
///
/// Alerts raised while nobody is listening are dropped.
#[derive(Debug, Clone)]
pub struct BroadcastAlerts {
    tx: broadcast::Sender<String>,
}

impl BroadcastAlerts {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }
}

impl AlertSink for BroadcastAlerts {
    fn alert(&self, text: &str) {
        if self.tx.send(text.to_string()).is_err() {
            tracing::debug!(alert = %text, "Alert raised with no listeners");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drain() {
        let queue = AlertQueue::new();
        queue.alert("one");
        queue.alert("two");
        assert_eq!(queue.pending(), vec!["one", "two"]);
        assert_eq!(queue.drain(), vec!["one", "two"]);
        assert!(queue.drain().is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_subscribers() {
        let alerts = BroadcastAlerts::new(8);
        let mut rx = alerts.subscribe();
        alerts.alert("Error uploading file");
        assert_eq!(rx.recv().await.unwrap(), "Error uploading file");
    }
}
