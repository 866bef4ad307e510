//! RAG Chat
//!
//! Entry point: serves the web UI or runs the terminal REPL.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rag_chat::config::{AppConfig, Cli, Command};
use rag_chat::{repl, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) before anything reads the environment
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED); stderr keeps the REPL's stdout clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_from_cli(&cli)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::start_server(Arc::new(config)).await,
        Command::Repl => repl::start_repl(&config).await,
    }
}
