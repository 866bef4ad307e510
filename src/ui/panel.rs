//! Chat panel markup.
//!
//! The transcript and file list are rendered as standalone fragments so the
//! browser can swap them in place when the panel changes.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::chat::{PanelState, UploadedFileRecord};

/// DOM id of the transcript container.
pub const MESSAGES_ID: &str = "messages";
/// DOM id of the file list container.
pub const FILES_ID: &str = "files";

/// Render the whole chat panel: transcript, composer and upload zone.
pub fn render_panel(state: &PanelState) -> String {
    let transcript = render_transcript(state);
    let files = render_files(&state.files);
    let composer = encode_text(&state.composer);
    let disabled = if state.loading { " disabled" } else { "" };

    format!(
        r#"
    <div class="chatContainer" id="chat-panel">
        <section class="chat">
            <div class="messages" id="{MESSAGES_ID}">{transcript}</div>

            <form class="composer" id="composer" action="/chat/send" method="post">
                <textarea name="text" placeholder="Ask a question about your uploaded PDFs...">{composer}</textarea>
                <button type="submit" class="btn primary" id="send"{disabled}>Send</button>
            </form>
        </section>

        <aside class="upload">
            <div class="drop" id="drop-zone">
                <div class="hint">Drag &amp; drop PDF here, or</div>
                <input id="file-input" type="file" accept="application/pdf" style="display: none">
                <button type="button" class="btn ghost" id="select-file">Select PDF</button>
            </div>

            <div class="files" id="{FILES_ID}">{files}</div>
        </aside>
    </div>
    "#
    )
}

/// Render the transcript, followed by a placeholder while an answer is pending.
pub fn render_transcript(state: &PanelState) -> String {
    let mut html = String::new();
    for message in &state.messages {
        let role = message.role.as_str();
        let _ = write!(
            html,
            r#"<div class="msgRow {role}" data-id="{id}"><div class="msg {role}">{text}</div><div class="meta muted">{role} &bull; {time}</div></div>"#,
            id = message.id,
            text = encode_text(&message.text),
            time = message.display_time(),
        );
    }
    if state.loading {
        html.push_str(r#"<div class="msgRow bot"><div class="msg bot">Thinking…</div></div>"#);
    }
    html
}

/// Render the uploaded-file list.
pub fn render_files(files: &[UploadedFileRecord]) -> String {
    if files.is_empty() {
        return r#"<div class="hint">No files uploaded</div>"#.to_string();
    }

    let mut html = String::new();
    for file in files {
        let _ = write!(
            html,
            r#"<div class="fileItem"><div><div class="fileName" title="{title}">{name}</div><div class="fileMeta">{at}</div></div><div class="kbd">Uploaded</div></div>"#,
            title = encode_double_quoted_attribute(&file.name),
            name = encode_text(&file.name),
            at = encode_text(&file.uploaded_at),
        );
    }
    html
}
