//! RAG Chat
//!
//! A chat front-end for a retrieval-augmented-generation backend: upload PDFs,
//! ask questions about them, read the answers.
//!
//! # Architecture
//!
//! - **Backend**: HTTP client for the external RAG service (`/ask`, `/upload`)
//! - **Chat panel**: transcript, composer, loading flag and uploaded files,
//!   with change notification for re-rendering
//! - **Web UI**: Axum server rendering the page shell and panel, with SSE updates
//! - **REPL**: terminal front-end over the same panel
//!
//! # Modules
//!
//! - [`backend`]: backend trait and reqwest client
//! - [`chat`]: chat panel state and operations
//! - [`events`]: panel change events streamed to the browser
//! - [`ui`]: HTML rendering
//! - [`server`]: HTTP routes
//! - [`repl`]: terminal front-end

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod events;
pub mod repl;
pub mod server;
pub mod ui;

use crate::chat::{BroadcastAlerts, ChatPanel};
use crate::config::AppConfig;

use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single chat panel this server drives.
    pub panel: ChatPanel,
    /// Alerts raised by the panel, fanned out to connected browsers.
    pub alerts: BroadcastAlerts,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
