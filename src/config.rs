use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "£".to_string(),
        }
    }
}

fn default_currency() -> String {
    "£".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:7411".to_string(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7411".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate display
    if config.display.currency.is_empty() {
        anyhow::bail!("display.currency must not be empty");
    }

    // Validate server
    if config.server.bind.is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}
