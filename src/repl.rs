//! Terminal front-end for the chat panel.
//!
//! Reads one question per line and prints the answer. `:upload <path>` sends
//! a PDF to the backend; `quit`, `exit` or `q` leaves.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::backend::{HttpBackend, UploadFile};
use crate::chat::{ChatPanel, Role, TerminalAlerts, UploadOutcome};
use crate::config::AppConfig;

const QUIT_WORDS: &[&str] = &["quit", "exit", "q"];
const UPLOAD_COMMAND: &str = ":upload";

/// Run the REPL on stdin/stdout against the configured backend.
pub async fn start_repl(config: &AppConfig) -> anyhow::Result<()> {
    let backend = Arc::new(HttpBackend::new(&config.backend.base_url)?);
    let panel = ChatPanel::new(backend, Arc::new(TerminalAlerts));

    tracing::info!(
        name: "repl.started",
        base_url = %config.backend.base_url,
        "REPL started"
    );

    run_repl(&panel, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Drive `panel` from line-oriented `input`, writing answers to `output`.
pub async fn run_repl<R, W>(panel: &ChatPanel, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(b"Ready!\n").await?;

    loop {
        output.write_all(b"\nYour question: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if QUIT_WORDS.contains(&line.to_lowercase().as_str()) {
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let Some(path) = line.strip_prefix(UPLOAD_COMMAND) {
            upload(panel, path.trim(), &mut output).await?;
            continue;
        }

        let last_seen = panel.snapshot().messages.last().map(|m| m.id);
        panel.set_composer(line);
        panel.send().await;

        let state = panel.snapshot();
        for message in state.messages_after(last_seen) {
            if message.role == Role::Bot {
                output
                    .write_all(format!("Answer: {}\n", message.text).as_bytes())
                    .await?;
            }
        }
    }

    output.flush().await?;
    Ok(())
}

async fn upload<W>(panel: &ChatPanel, path: &str, output: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if path.is_empty() {
        output.write_all(b"Usage: :upload <path>\n").await?;
        return Ok(());
    }

    let file = match UploadFile::from_path(path).await {
        Ok(file) => file,
        Err(e) => {
            output
                .write_all(format!("Error: cannot read {path}: {e}\n").as_bytes())
                .await?;
            return Ok(());
        }
    };

    // Rejections and failures are reported through the panel's alert sink.
    if let Some(UploadOutcome::Recorded(record)) = panel.on_file_change([file]).await {
        output
            .write_all(format!("Uploaded {} at {}\n", record.name, record.uploaded_at).as_bytes())
            .await?;
    }
    Ok(())
}
