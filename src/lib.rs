// src/lib.rs
//! vault-format-upgrade — In-place format upgrades for encrypted vaults
//!
//! Features:
//! - Ordered, single-version upgrade steps behind one registry
//! - Per-file block migration that re-encrypts at most one chunk per file
//! - Crash-tolerant: every file's state is re-derived from its header on retry
//! - secure-gate secret types for all key material

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod file_ops;
pub mod upgrade;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{ContentKey32, MasterKey32, PlainText};
pub use config::{load as load_config, Config, Localization};
pub use crypto::{AesGcmCryptor, ContentCryptor, FileHeader};
pub use error::{CoreError, CryptoError, UpgradeError};
pub use upgrade::{UpgradeChain, UpgradeReport, UpgradeStrategy, UpgradeVersion4To5, Vault};
