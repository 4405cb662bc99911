use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ResetConfig {
    pub storage: StorageConfig,
    pub reset: TablesConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TablesConfig {
    pub tables: Vec<String>,
    pub clear_sequence: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "chat_app.db".into(),
        }
    }
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            tables: vec!["messages".into(), "users".into()],
            clear_sequence: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Returns `~/.chat-reset/`, or `.chat-reset/` when no home directory is known.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".chat-reset")
}

/// Returns the default config file path: `~/.chat-reset/config.toml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

impl ResetConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ResetConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (CHAT_RESET_DB, CHAT_RESET_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CHAT_RESET_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("CHAT_RESET_LOG_LEVEL") {
            self.log.level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    /// The reset plan described by the `[reset]` section.
    pub fn plan(&self) -> crate::reset::ResetPlan {
        crate::reset::ResetPlan {
            tables: self.reset.tables.clone(),
            clear_sequence: self.reset.clear_sequence,
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
