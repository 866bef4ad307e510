//! Panel change events for the browser.
//!
//! The web UI keeps the composer client-side and only swaps the parts of the
//! panel that changed. [`panel_events`] turns panel revisions and alerts into
//! a stream of [`PanelEvent`]s, which [`build_sse_response`] frames as SSE.
//!
//! # Example
//!
//! ```rust
//! use rag_chat::events::PanelEvent;
//!
//! let event = PanelEvent::Loading(true);
//! assert_eq!(event.name(), "loading");
//! assert_eq!(event.data(), "true");
//! ```

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::chat::ChatPanel;
use crate::ui::{render_files, render_transcript};

/// One update pushed to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PanelEvent {
    /// Rendered transcript, including the pending-answer placeholder.
    Transcript(String),
    /// Rendered file list.
    Files(String),
    /// Whether an ask is in flight.
    Loading(bool),
    /// Alert text to show the user.
    Alert(String),
}

impl PanelEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transcript(_) => "transcript",
            Self::Files(_) => "files",
            Self::Loading(_) => "loading",
            Self::Alert(_) => "alert",
        }
    }

    /// SSE payload.
    pub fn data(&self) -> String {
        match self {
            Self::Transcript(html) | Self::Files(html) | Self::Alert(html) => html.clone(),
            Self::Loading(loading) => loading.to_string(),
        }
    }
}

enum Wake {
    Changed,
    Alert(String),
    Closed,
}

/// Stream the panel's current view, then every change to it.
///
/// The first three events carry the full view. After that a fragment is only
/// re-sent when its rendering differs from the last one sent. Alerts are
/// forwarded as they arrive.
pub fn panel_events(
    panel: ChatPanel,
    mut alerts: broadcast::Receiver<String>,
) -> impl Stream<Item = PanelEvent> + Send {
    async_stream::stream! {
        let mut changes = panel.subscribe();
        let mut last_transcript: Option<String> = None;
        let mut last_files: Option<String> = None;
        let mut last_loading: Option<bool> = None;

        loop {
            changes.borrow_and_update();
            let state = panel.snapshot();

            let transcript = render_transcript(&state);
            if last_transcript.as_ref() != Some(&transcript) {
                last_transcript = Some(transcript.clone());
                yield PanelEvent::Transcript(transcript);
            }

            let files = render_files(&state.files);
            if last_files.as_ref() != Some(&files) {
                last_files = Some(files.clone());
                yield PanelEvent::Files(files);
            }

            if last_loading != Some(state.loading) {
                last_loading = Some(state.loading);
                yield PanelEvent::Loading(state.loading);
            }

            let wake = tokio::select! {
                changed = changes.changed() => match changed {
                    Ok(()) => Wake::Changed,
                    Err(_) => Wake::Closed,
                },
                alert = alerts.recv() => match alert {
                    Ok(text) => Wake::Alert(text),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Alert subscriber lagged");
                        Wake::Changed
                    }
                    Err(RecvError::Closed) => Wake::Closed,
                },
            };

            match wake {
                Wake::Changed => {}
                Wake::Alert(text) => yield PanelEvent::Alert(text),
                Wake::Closed => break,
            }
        }
    }
}

/// Frame panel events as Server-Sent Events.
pub fn build_sse_response<S>(stream: S) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send>
where
    S: Stream<Item = PanelEvent> + Send + 'static,
{
    let stream = stream.map(|event| Ok(Event::default().event(event.name()).data(event.data())));

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
