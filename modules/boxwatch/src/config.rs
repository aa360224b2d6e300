use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// Default config filename, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "box.config.json";

/// Credential and endpoint for the Box events API, loaded once from a
/// local JSON file shaped `{ "Bearer": ..., "baseUrl": ... }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "Bearer")]
    pub bearer: String,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Config file {} is not valid JSON", path.display()))?;
        Ok(config)
    }

    /// Resolve the config path: explicit argument first, then the
    /// BOXWATCH_CONFIG env var, then the default filename.
    pub fn resolve_path(arg: Option<String>) -> PathBuf {
        arg.or_else(|| std::env::var("BOXWATCH_CONFIG").ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Log the loaded config without the bearer token.
    pub fn log_redacted(&self) {
        info!(base_url = %self.base_url, "Config loaded (bearer token redacted)");
    }
}
