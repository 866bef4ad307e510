//! HTML rendering for the web UI.
//!
//! # Structure
//!
//! - [`shell`]: page framing (title, subtitle) around the panel
//! - [`panel`]: transcript, composer, upload zone and file list

pub mod panel;
pub mod shell;

pub use panel::{render_files, render_panel, render_transcript};
pub use shell::render_page;
