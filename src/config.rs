use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `RAG_CHAT__BACKEND__BASE_URL`.
const ENV_PREFIX: &str = "RAG_CHAT";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the RAG backend
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the web chat UI (default)
    Serve,
    /// Chat from the terminal
    Repl,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub title: String,
    pub subtitle: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::load_from_cli(&cli)
    }

    /// Build the configuration.
    ///
    /// Priority: CLI flag (or its env var) > `RAG_CHAT__*` env > config file > defaults.
    pub fn load_from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("backend.base_url", "http://localhost:8000")?
            .set_default("ui.title", "RAG Chat")?
            .set_default("ui.subtitle", "Upload PDFs and ask questions - local RAG")?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = &cli.backend_url {
            builder = builder.set_override("backend.base_url", url.as_str())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Address the web UI binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommand() {
        let cli = Cli::try_parse_from(["rag-chat", "--port", "4000", "repl"]).unwrap();
        assert_eq!(cli.port, Some(4000));
        assert_eq!(cli.command, Some(Command::Repl));

        let cli = Cli::try_parse_from(["rag-chat"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unknown_flag_is_a_config_error() {
        let err = AppConfig::load_from_args(["rag-chat", "--bogus"]).unwrap_err();
        assert!(matches!(err, config::ConfigError::Message(_)));
    }
}
