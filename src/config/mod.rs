mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub const TOKEN_ENV: &str = "HUGGING_FACE_TOKEN";
pub const MODE_ENV: &str = "RELAY_MODE";
pub const NODE_ENV: &str = "NODE_ENV";
pub const PORT_ENV: &str = "PORT";

/// Loads configuration from `$CONFIG_PATH` (or `config.yaml`) and applies
/// environment overrides. A missing file yields the defaults.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_from(&config_path).await?;
    config.apply_overrides(|key| env::var(key).ok())?;

    Ok(config)
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    if !tokio::fs::try_exists(path).await? {
        debug!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

impl Config {
    /// Overrides file values with whatever `lookup` returns for the known
    /// environment keys.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(token) = lookup(TOKEN_ENV) {
            self.inference.api_token = Some(token);
        }

        if let Some(mode) = lookup(MODE_ENV) {
            self.server.mode = mode.parse()?;
        } else if let Some(node_env) = lookup(NODE_ENV) {
            // Only an exact "development" enables detail; anything else is production.
            self.server.mode = if node_env == "development" {
                ExecutionMode::Development
            } else {
                ExecutionMode::Production
            };
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("Invalid port: '{}'", port)))?;
        }

        Ok(())
    }
}
