// src/config/app.rs
use super::defaults::*;
use crate::error::CoreError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_layout")]
    pub layout: Layout,
    /// Localized message overrides, keyed like `upgrade.version4to5.msg`
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

/// Where the upgrade looks for encrypted files inside a vault
#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_filename_pattern")]
    pub filename_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            layout: default_layout(),
            messages: HashMap::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once — falls back to built-in defaults if missing or broken
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        if !Path::new(&config_path).exists() {
            debug!("{config_path} not found — using built-in defaults");
            return Config::default();
        }

        match Config::from_file(&config_path) {
            Ok(conf) => conf,
            Err(e) => {
                warn!("Ignoring unusable config {config_path}: {e}");
                Config::default()
            }
        }
    })
}
