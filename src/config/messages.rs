// src/config/messages.rs
//! Message lookup for user-facing upgrade text

use std::collections::HashMap;

use super::defaults::default_message;
use super::Config;

#[derive(Debug, Clone, Default)]
pub struct Localization {
    overrides: HashMap<String, String>,
}

impl Localization {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.messages.clone())
    }

    /// Resolve `key`: configured override, then built-in default, then the key itself
    pub fn get(&self, key: &str) -> String {
        self.overrides
            .get(key)
            .cloned()
            .or_else(|| default_message(key).map(str::to_owned))
            .unwrap_or_else(|| key.to_owned())
    }

    /// Resolve `key` and substitute the `{vault}` placeholder
    pub fn format(&self, key: &str, vault_name: &str) -> String {
        self.get(key).replace("{vault}", vault_name)
    }
}
