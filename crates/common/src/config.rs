use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration, read once at startup and read-only afterwards.
///
/// Only the API key is mandatory; everything else falls back to the defaults
/// below, so a minimal `config.json` stays a one-field document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credential for the chat-completion endpoint. The upper-case alias
    /// accepts config files written for earlier builds.
    #[serde(alias = "OPENAI_API_KEY")]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL override for OpenAI-compatible endpoints.
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default = "default_error_log_file")]
    pub error_log_file: PathBuf,

    #[serde(default = "default_app_log_file")]
    pub app_log_file: PathBuf,

    #[serde(default = "default_true")]
    pub notify_on_startup: bool,

    /// When true, the generate action can be used once per session.
    #[serde(default = "default_true")]
    pub generate_once: bool,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from("checklist_data.json")
}

fn default_error_log_file() -> PathBuf {
    PathBuf::from("error_log.txt")
}

fn default_app_log_file() -> PathBuf {
    PathBuf::from("ticklist.log")
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load the configuration or fail with a user-readable error chain.
    ///
    /// A missing file is a hard startup error, not a silent default.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("config file {} is not valid JSON", path.display()))?;
        if config.api_key.trim().is_empty() {
            bail!("config file {} has an empty api_key", path.display());
        }
        Ok(config)
    }
}
