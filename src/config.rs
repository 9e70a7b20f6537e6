//! Configuration loading and management.
//!
//! Loads configuration from `./hcplog.toml` (or `$HCPLOG_CONFIG_PATH`).
//! Environment variables override file values; file values override
//! defaults.
//!
//! Precedence: env vars > config file > defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HcplogConfig {
    /// Storage settings (`[storage]`).
    pub storage: StorageConfig,
    /// Logging settings (`[log]`).
    pub log: LogConfig,
    /// Optional model-backed path (`[llm]`). Absent means rules only.
    pub llm: Option<LlmConfig>,
}

/// Storage settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the SQLite database file.
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "hcplog.db".to_owned(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Tracing log level filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// OpenAI-compatible provider settings for the model-backed path.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the chat-completions endpoint
    /// (e.g. `https://api.groq.com/openai/v1`).
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

impl HcplogConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// Config file path: `$HCPLOG_CONFIG_PATH` or `./hcplog.toml`.
    /// A missing file is not an error — defaults apply.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_from_file() -> Result<Self> {
        let path = Self::config_path_with(|key| std::env::var(key).ok());
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                Self::from_toml(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read config file: {e}")),
        }
    }

    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        if let Some(p) = env("HCPLOG_CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("hcplog.toml")
    }

    /// Apply environment variable overrides.
    ///
    /// Takes a resolver function for testability (avoids process-global
    /// `set_var` in tests).
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("HCPLOG_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = env("HCPLOG_LOG_LEVEL") {
            self.log.level = v;
        }

        // Env var presence creates the provider.
        if let Some(key) = env("HCPLOG_LLM_API_KEY") {
            let base_url = env("HCPLOG_LLM_BASE_URL").unwrap_or_else(|| {
                self.llm
                    .as_ref()
                    .map(|c| c.base_url.clone())
                    .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_owned())
            });
            let model = env("HCPLOG_LLM_MODEL").unwrap_or_else(|| {
                self.llm
                    .as_ref()
                    .map(|c| c.model.clone())
                    .unwrap_or_else(|| "llama-3.3-70b-versatile".to_owned())
            });
            self.llm = Some(LlmConfig {
                base_url,
                api_key: key,
                model,
            });
        }
    }

    /// Parse a TOML string into config (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: HcplogConfig =
            toml::from_str(toml_str).context("failed to parse config TOML")?;
        Ok(config)
    }
}
