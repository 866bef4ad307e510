//! Snapshot of the chat panel's state.

use serde::{Deserialize, Serialize};

use super::message::{Message, UploadedFileRecord};

/// Everything a render of the chat panel needs.
///
/// Snapshots are taken under the panel's lock, so a snapshot never shows a
/// half-applied mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    /// Transcript in insertion order.
    pub messages: Vec<Message>,
    /// Uploaded-file records in insertion order.
    pub files: Vec<UploadedFileRecord>,
    /// Current composer text.
    pub composer: String,
    /// True while an ask request is in flight.
    pub loading: bool,
    /// Bumped on every mutation.
    pub revision: u64,
}

impl PanelState {
    /// Messages created after `id`, in order.
    pub fn messages_after(&self, id: Option<super::MessageId>) -> &[Message] {
        match id {
            Some(id) => {
                let start = self.messages.partition_point(|m| m.id <= id);
                &self.messages[start..]
            }
            None => &self.messages,
        }
    }
}
