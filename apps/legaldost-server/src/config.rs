//! Server configuration
//!
//! Every flag can also be set through the environment (a `.env` file is
//! loaded first by `main`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use legal_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use legal_ai::{ChatContext, GeminiConfig};

/// Default upload size cap: 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Command-line arguments for the LegalDost server
#[derive(Parser, Debug, Clone)]
#[command(name = "legaldost-server")]
#[command(about = "LegalDost API server for legal document analysis")]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// SQLite connection string; defaults to a file in the platform data dir
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Directory uploaded files are stored in
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Maximum accepted upload size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    /// Model request timeout in seconds
    #[arg(long, env = "AI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub ai_timeout_secs: u64,

    /// Characters of document text sent with each chat question
    #[arg(long, env = "CHAT_CONTEXT_CHARS", default_value_t = legal_ai::client::DEFAULT_CHAT_CONTEXT_CHARS)]
    pub chat_context_chars: usize,

    /// Previous chat turns replayed with each question
    #[arg(long, env = "CHAT_HISTORY_TURNS", default_value_t = legal_ai::client::DEFAULT_CHAT_HISTORY_TURNS)]
    pub chat_history_turns: usize,

    /// Rate limit: requests allowed in a burst per IP
    #[arg(long, env = "RATE_LIMIT_BURST", default_value = "100")]
    pub rate_limit_burst: u32,

    /// Rate limit: seconds until one more request is allowed
    #[arg(long, env = "RATE_LIMIT_PERIOD_SECS", default_value = "9")]
    pub rate_limit_period_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(self.gemini_api_key.clone())
            .with_model(self.gemini_model.clone())
            .with_base_url(self.gemini_base_url.clone())
            .with_timeout(Duration::from_secs(self.ai_timeout_secs))
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            upload_dir: self.upload_dir.clone(),
            max_upload_bytes: self.max_upload_bytes,
            chat_context: ChatContext {
                max_document_chars: self.chat_context_chars,
                history_turns: self.chat_history_turns,
            },
        }
    }

    /// `--database-url`, or a `legaldost.db` file in the platform data dir
    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(|| {
            let data_dir = dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("legaldost");
            std::fs::create_dir_all(&data_dir).ok();
            sqlite_file_url(&data_dir)
        })
    }
}

fn sqlite_file_url(dir: &Path) -> String {
    format!("sqlite:{}/legaldost.db?mode=rwc", dir.display())
}

/// Settings the request handlers need at runtime
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub chat_context: ChatContext,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            chat_context: ChatContext::default(),
        }
    }
}
