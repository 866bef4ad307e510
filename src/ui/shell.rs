//! Page shell: document head, title bar and the mounted chat panel.

use html_escape::encode_text;

use super::panel::render_panel;
use crate::chat::PanelState;
use crate::config::UiConfig;

/// Render the full page with the chat panel in its current state.
pub fn render_page(ui: &UiConfig, state: &PanelState) -> String {
    html_shell(ui, &render_panel(state))
}

/// Wrap `content` in the page framing.
fn html_shell(ui: &UiConfig, content: &str) -> String {
    let title = encode_text(&ui.title);
    let subtitle = encode_text(&ui.subtitle);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="app">
        <div class="container">
            <header class="header">
                <div>
                    <div class="title">{title}</div>
                    <div class="subtitle">{subtitle}</div>
                </div>
            </header>

            <main class="body">
                {content}
            </main>
        </div>
    </div>
    <script>{SCRIPT}</script>
</body>
</html>"#
    )
}

const STYLE: &str = r"
body { margin: 0; font-family: system-ui, sans-serif; background: #0f1115; color: #e6e6e6; }
.container { max-width: 1100px; margin: 0 auto; padding: 24px; }
.header { margin-bottom: 16px; }
.title { font-size: 1.5rem; font-weight: 600; }
.subtitle, .muted, .hint, .fileMeta { color: #8a8f98; font-size: 0.85rem; }
.chatContainer { display: flex; gap: 16px; }
.chat { flex: 1; display: flex; flex-direction: column; min-height: 70vh; }
.messages { flex: 1; overflow-y: auto; padding: 8px; }
.msgRow { margin: 8px 0; display: flex; flex-direction: column; }
.msgRow.user { align-items: flex-end; }
.msg { padding: 8px 12px; border-radius: 12px; max-width: 75%; white-space: pre-wrap; }
.msg.user { background: #2b5cff; color: #fff; }
.msg.bot { background: #1c1f26; }
.composer { display: flex; gap: 8px; }
.composer textarea { flex: 1; min-height: 48px; resize: vertical; }
.upload { width: 280px; }
.drop { border: 2px dashed #333843; border-radius: 12px; padding: 16px; text-align: center; }
.fileItem { display: flex; justify-content: space-between; padding: 8px 0; }
.btn { border: 0; border-radius: 8px; padding: 8px 14px; cursor: pointer; }
.btn.primary { background: #2b5cff; color: #fff; }
.btn.primary:disabled { opacity: 0.5; cursor: not-allowed; }
.btn.ghost { background: transparent; color: inherit; border: 1px solid #333843; }
.kbd { font-size: 0.75rem; border: 1px solid #333843; border-radius: 4px; padding: 2px 6px; }
";

const SCRIPT: &str = r"
const messages = document.getElementById('messages');
const files = document.getElementById('files');
const composer = document.getElementById('composer');
const send = document.getElementById('send');
const dropZone = document.getElementById('drop-zone');
const fileInput = document.getElementById('file-input');

composer.addEventListener('submit', async (e) => {
    e.preventDefault();
    const text = composer.elements.text.value;
    composer.elements.text.value = '';
    await fetch('/chat/send', { method: 'POST', body: new URLSearchParams({ text }) });
});

async function uploadFiles(list, source) {
    if (!list || list.length === 0) return;
    const fd = new FormData();
    fd.append('source', source);
    for (const f of list) fd.append('file', f);
    await fetch('/chat/upload', { method: 'POST', body: fd });
}

document.getElementById('select-file').addEventListener('click', () => fileInput.click());
fileInput.addEventListener('change', async () => {
    await uploadFiles(fileInput.files, 'picker');
    fileInput.value = '';
});
dropZone.addEventListener('dragover', (e) => e.preventDefault());
dropZone.addEventListener('drop', (e) => {
    e.preventDefault();
    uploadFiles(e.dataTransfer.files, 'drop');
});

const events = new EventSource('/chat/events');
events.addEventListener('transcript', (e) => {
    messages.innerHTML = e.data;
    messages.scrollTop = messages.scrollHeight;
});
events.addEventListener('files', (e) => { files.innerHTML = e.data; });
events.addEventListener('loading', (e) => { send.disabled = e.data === 'true'; });
events.addEventListener('alert', (e) => window.alert(e.data));
";
