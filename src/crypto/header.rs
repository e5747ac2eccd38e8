// src/crypto/header.rs
use std::fmt;

use crate::aliases::ContentKey32;
use crate::consts::{HEADER_NONCE_SIZE, UNKNOWN_CLEARTEXT_SIZE};

/// Decrypted file header
pub struct FileHeader {
    nonce: [u8; HEADER_NONCE_SIZE],
    cleartext_size: i64,
    content_key: ContentKey32,
}

impl FileHeader {
    pub fn new(nonce: [u8; HEADER_NONCE_SIZE], cleartext_size: i64, content_key: ContentKey32) -> Self {
        Self {
            nonce,
            cleartext_size,
            content_key,
        }
    }

    /// Stable per-file nonce, bound into every chunk
    pub fn nonce(&self) -> &[u8; HEADER_NONCE_SIZE] {
        &self.nonce
    }

    /// Negative means the size is not stored and follows from the file length
    pub fn cleartext_size(&self) -> i64 {
        self.cleartext_size
    }

    /// `Some(size)` if the header still carries an explicit size
    pub fn explicit_cleartext_size(&self) -> Option<u64> {
        u64::try_from(self.cleartext_size).ok()
    }

    pub fn mark_size_unknown(&mut self) {
        self.cleartext_size = UNKNOWN_CLEARTEXT_SIZE;
    }

    pub fn content_key(&self) -> &ContentKey32 {
        &self.content_key
    }
}

impl fmt::Debug for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHeader")
            .field("nonce", &hex::encode(self.nonce))
            .field("cleartext_size", &self.cleartext_size)
            .field("content_key", &"[REDACTED]")
            .finish()
    }
}
