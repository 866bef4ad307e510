//! Transcript messages and uploaded-file records.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Display format for a message's time, e.g. `3:07:42 PM`.
const TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Display format for an upload time, e.g. `6/1/2026, 3:07:42 PM`.
const DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-panel message identifier. Strictly increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub(crate) fn new(id: MessageId, role: Role, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            created_at: Local::now(),
        }
    }

    /// Local time of creation formatted for display.
    pub fn display_time(&self) -> String {
        self.created_at.format(TIME_FORMAT).to_string()
    }
}

/// Display record of a file the backend accepted.
///
/// This is not the file content, only what the file list shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileRecord {
    pub name: String,
    pub uploaded_at: String,
}

impl UploadedFileRecord {
    /// Record an upload that completed now.
    pub fn now(name: impl Into<String>) -> Self {
        Self::at(name, Local::now())
    }

    /// Record an upload that completed at `when`.
    pub fn at(name: impl Into<String>, when: DateTime<Local>) -> Self {
        Self {
            name: name.into(),
            uploaded_at: when.format(DATETIME_FORMAT).to_string(),
        }
    }
}
