//! Chat panel state and operations.
//!
//! The panel owns every piece of interactive state: the transcript, the
//! composer text, the loading flag and the list of uploaded files. Front-ends
//! (the web UI and the terminal REPL) call into [`ChatPanel`] and re-render
//! from [`PanelState`] snapshots whenever [`ChatPanel::subscribe`] reports a
//! change.
//!
//! # Example
//!
//! ```rust
//! use rag_chat::chat::{Role, UploadedFileRecord};
//!
//! let record = UploadedFileRecord::now("report.pdf");
//! assert_eq!(record.name, "report.pdf");
//! assert_eq!(Role::User.as_str(), "user");
//! ```

mod alert;
mod message;
mod panel;
mod state;

pub use alert::{AlertQueue, AlertSink, BroadcastAlerts, TerminalAlerts};
pub use message::{Message, MessageId, Role, UploadedFileRecord};
pub use panel::{
    ChatPanel, DropEvent, NO_ANSWER, SERVER_ERROR, UNKNOWN_UPLOAD_ERROR, UPLOAD_ERROR,
    UploadOutcome,
};
pub use state::PanelState;
