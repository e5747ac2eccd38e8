// src/error.rs
//! Public error types for the entire crate

use thiserror::Error;

/// Failures reported by a [`ContentCryptor`](crate::crypto::ContentCryptor)
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("header authentication failed: wrong key or not a header of this format")]
    HeaderDecryption,

    #[error("invalid file header: {reason}")]
    InvalidHeader { reason: String },

    #[error("chunk {index} authentication failed: tampered data or wrong file header")]
    ChunkDecryption { index: u64 },

    #[error("chunk {index} has invalid length {actual}")]
    IncompleteChunk { index: u64, actual: usize },

    #[error("encryption failed: {0}")]
    Encryption(String),
}

/// Internal error for single operations (one file, one config load, …)
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crypto operation failed: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid filename pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The single coarse failure an upgrade surfaces to its caller.
///
/// `Display` is the localized message; the low-level cause stays reachable
/// through [`std::error::Error::source`].
#[derive(Error, Debug)]
pub enum UpgradeError {
    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Crypto {
        message: String,
        #[source]
        source: CryptoError,
    },

    #[error("{message}")]
    VersionMismatch {
        message: String,
        expected: u32,
        found: u32,
    },

    #[error("{message}")]
    NoUpgradePath { message: String, from: u32, to: u32 },
}

impl UpgradeError {
    /// Localized, user-facing text
    pub fn message(&self) -> &str {
        match self {
            UpgradeError::Io { message, .. }
            | UpgradeError::Crypto { message, .. }
            | UpgradeError::VersionMismatch { message, .. }
            | UpgradeError::NoUpgradePath { message, .. } => message,
        }
    }
}
