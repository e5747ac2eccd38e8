// src/crypto/mod.rs
//! Content cryptor capability — everything the upgrade needs from the cipher
//!
//! The upgrade core only talks to [`ContentCryptor`]; it never touches keys,
//! nonces or tags directly. [`AesGcmCryptor`] is the reference implementation.
mod aes_gcm;
mod header;

pub use aes_gcm::AesGcmCryptor;
pub use header::FileHeader;

use crate::aliases::PlainText;
use crate::error::CryptoError;

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Header and chunk encryption for one on-disk format version
pub trait ContentCryptor {
    /// Fixed size of the encrypted header at offset 0
    fn header_size(&self) -> usize;

    fn cleartext_chunk_size(&self) -> usize;

    /// Always greater than [`cleartext_chunk_size`](Self::cleartext_chunk_size)
    fn ciphertext_chunk_size(&self) -> usize;

    /// New header with a fresh nonce and content key
    fn create_header(&self, cleartext_size: i64) -> FileHeader;

    fn decrypt_header(&self, ciphertext: &[u8]) -> Result<FileHeader>;

    fn encrypt_header(&self, header: &FileHeader) -> Result<Vec<u8>>;

    /// Decrypt chunk `index`. A final chunk may be shorter than a full chunk.
    fn decrypt_chunk(
        &self,
        ciphertext: &[u8],
        index: u64,
        header: &FileHeader,
        is_final: bool,
    ) -> Result<PlainText>;

    fn encrypt_chunk(&self, cleartext: &[u8], index: u64, header: &FileHeader) -> Result<Vec<u8>>;

    /// Ciphertext payload size for `cleartext_size` bytes with no padding chunk
    fn ciphertext_size_for(&self, cleartext_size: u64) -> u64 {
        let cleartext_chunk = self.cleartext_chunk_size() as u64;
        let ciphertext_chunk = self.ciphertext_chunk_size() as u64;
        let overhead = ciphertext_chunk - cleartext_chunk;
        let full_chunks = cleartext_size / cleartext_chunk;
        let rest = cleartext_size % cleartext_chunk;
        let partial = if rest > 0 { rest + overhead } else { 0 };
        full_chunks * ciphertext_chunk + partial
    }

    /// Inverse of [`ciphertext_size_for`](Self::ciphertext_size_for);
    /// `None` if no cleartext size maps to `ciphertext_size`
    fn cleartext_size_for(&self, ciphertext_size: u64) -> Option<u64> {
        let cleartext_chunk = self.cleartext_chunk_size() as u64;
        let ciphertext_chunk = self.ciphertext_chunk_size() as u64;
        let overhead = ciphertext_chunk - cleartext_chunk;
        let full_chunks = ciphertext_size / ciphertext_chunk;
        let rest = ciphertext_size % ciphertext_chunk;
        match rest {
            0 => Some(full_chunks * cleartext_chunk),
            r if r > overhead => Some(full_chunks * cleartext_chunk + r - overhead),
            _ => None,
        }
    }
}
