// src/config/mod.rs
//! Configuration system for vault-format-upgrade
//!
//! Central, lazy-loaded global config from TOML with built-in defaults,
//! plus the localized message table.

pub use app::{load, Config, Layout};
pub use messages::Localization;

mod app;
mod defaults;
mod messages;

pub use defaults::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
