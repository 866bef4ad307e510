use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::backend::{HttpBackend, UploadFile};
use crate::chat::{BroadcastAlerts, ChatPanel, DropEvent, PanelState, UploadOutcome};
use crate::config::AppConfig;
use crate::events::{build_sse_response, panel_events};
use crate::ui::render_page;

/// Alerts buffered per browser before older ones are dropped.
const ALERT_CAPACITY: usize = 16;

/// Multipart field carrying a file.
const FILE_FIELD: &str = "file";

/// Multipart field naming where the files came from (`picker` or `drop`).
const SOURCE_FIELD: &str = "source";

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    info!(
        name: "backend.config.loaded",
        base_url = %config.backend.base_url,
        "Backend configuration loaded"
    );

    let backend = Arc::new(HttpBackend::new(&config.backend.base_url)?);
    let alerts = BroadcastAlerts::new(ALERT_CAPACITY);
    let panel = ChatPanel::new(backend, Arc::new(alerts.clone()));

    let state = AppState {
        panel,
        alerts,
        config: Arc::clone(&config),
    };

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}

/// Build the router for the chat UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat/send", post(send_handler))
        .route("/chat/upload", post(upload_handler))
        .route("/chat/state", get(state_handler))
        .route("/chat/events", get(events_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Index page handler.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_page(&state.config.ui, &state.panel.snapshot()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Composer form body.
#[derive(Debug, Deserialize)]
struct SendForm {
    #[serde(default)]
    text: String,
}

/// POST /chat/send - Ask the composer text.
async fn send_handler(State(state): State<AppState>, Form(form): Form<SendForm>) -> StatusCode {
    state.panel.set_composer(form.text);
    if !state.panel.send().await {
        tracing::debug!("Ignoring empty question");
    }
    StatusCode::NO_CONTENT
}

/// Result of an upload request.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadStatus {
    /// No file was attached.
    Ignored,
    Recorded { name: String, uploaded_at: String },
    Rejected { alert: String },
    Failed { alert: String },
}

impl From<Option<UploadOutcome>> for UploadStatus {
    fn from(outcome: Option<UploadOutcome>) -> Self {
        match outcome {
            None => Self::Ignored,
            Some(UploadOutcome::Recorded(record)) => Self::Recorded {
                name: record.name,
                uploaded_at: record.uploaded_at,
            },
            Some(UploadOutcome::Rejected(alert)) => Self::Rejected { alert },
            Some(UploadOutcome::Failed(alert)) => Self::Failed { alert },
        }
    }
}

/// POST /chat/upload - Upload the first picked or dropped file.
async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadStatus>, (StatusCode, String)> {
    let mut files = Vec::new();
    let mut from_drop = false;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart field: {e}"),
        )
    })? {
        let field_name = field.name().map(ToString::to_string);
        match field_name.as_deref() {
            Some(FILE_FIELD) => {
                let name = field
                    .file_name()
                    .map_or_else(|| "upload.pdf".to_string(), ToString::to_string);
                let content_type = field.content_type().map_or_else(
                    || {
                        mime_guess::from_path(&name)
                            .first_or_octet_stream()
                            .to_string()
                    },
                    ToString::to_string,
                );
                let bytes = field.bytes().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read file '{name}': {e}"),
                    )
                })?;
                files.push(UploadFile::new(name, content_type, bytes.to_vec()));
            }
            Some(SOURCE_FIELD) => {
                let source = field.text().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read source field: {e}"),
                    )
                })?;
                from_drop = source == "drop";
            }
            _ => {}
        }
    }

    let outcome = if from_drop {
        let mut event = DropEvent::new(files);
        state.panel.on_drop(&mut event).await
    } else {
        state.panel.on_file_change(files).await
    };

    Ok(Json(outcome.into()))
}

/// GET /chat/state - Current panel snapshot.
async fn state_handler(State(state): State<AppState>) -> Json<PanelState> {
    Json(state.panel.snapshot())
}

/// GET /chat/events - Panel updates and alerts as SSE.
async fn events_handler(State(state): State<AppState>) -> impl IntoResponse {
    build_sse_response(panel_events(state.panel.clone(), state.alerts.subscribe()))
}
