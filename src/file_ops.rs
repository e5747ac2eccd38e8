// src/file_ops.rs
//! Whole-file decryption for both header encodings
//!
//! Files written before the upgrade carry an explicit cleartext size and may
//! hold trailing padding; upgraded files carry the size sentinel and their
//! length follows from the chunk layout alone.

use std::path::Path;

use crate::aliases::PlainText;
use crate::crypto::ContentCryptor;
use crate::error::{CoreError, CryptoError};

/// Decrypt an encrypted vault file on disk into memory
///
/// Returns exactly the cleartext the file represents, without padding.
pub fn decrypt_file<C: ContentCryptor + ?Sized>(
    path: impl AsRef<Path>,
    cryptor: &C,
) -> Result<PlainText, CoreError> {
    let ciphertext = std::fs::read(path.as_ref())?;
    decrypt_to_vec(&ciphertext, cryptor)
}

/// Same as [`decrypt_file`], for an in-memory ciphertext
pub fn decrypt_to_vec<C: ContentCryptor + ?Sized>(
    ciphertext: &[u8],
    cryptor: &C,
) -> Result<PlainText, CoreError> {
    let header_size = cryptor.header_size();
    if ciphertext.len() < header_size {
        return Err(CryptoError::InvalidHeader {
            reason: format!(
                "file has {} bytes, header alone needs {header_size}",
                ciphertext.len()
            ),
        }
        .into());
    }

    let (header_bytes, payload) = ciphertext.split_at(header_size);
    let header = cryptor.decrypt_header(header_bytes)?;

    let cleartext_size = match header.explicit_cleartext_size() {
        Some(size) => size,
        None => cryptor
            .cleartext_size_for(payload.len() as u64)
            .ok_or_else(|| CryptoError::InvalidHeader {
                reason: format!("{} payload bytes is not a valid chunk layout", payload.len()),
            })?,
    };

    let mut cleartext = Vec::with_capacity(payload.len());
    let chunk_count = payload.chunks(cryptor.ciphertext_chunk_size()).len();
    for (index, chunk) in payload.chunks(cryptor.ciphertext_chunk_size()).enumerate() {
        let is_final = index + 1 == chunk_count;
        let plain = cryptor.decrypt_chunk(chunk, index as u64, &header, is_final)?;
        cleartext.extend_from_slice(plain.expose_secret());
    }

    if (cleartext.len() as u64) < cleartext_size {
        return Err(CryptoError::InvalidHeader {
            reason: format!(
                "header claims {cleartext_size} bytes, content holds {}",
                cleartext.len()
            ),
        }
        .into());
    }
    cleartext.truncate(cleartext_size as usize);

    Ok(PlainText::new(cleartext))
}
