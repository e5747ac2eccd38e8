// src/crypto/aes_gcm.rs
//! AES-256-GCM header and chunk cryptor
//!
//! Header layout (80 bytes):
//! `header_nonce[12] | seal_nonce[12] | sealed(cleartext_size i64 BE | content_key[32]) | tag[16]`
//!
//! Chunk layout: `chunk_nonce[12] | sealed(cleartext) | tag[16]`, authenticated
//! with `index u64 BE | header_nonce` so chunks cannot be reordered or moved
//! between files.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;
use tracing::trace;

use super::{ContentCryptor, FileHeader, Result};
use crate::aliases::{ContentKey32, MasterKey32, PlainText};
use crate::consts::{
    CHUNK_NONCE_SIZE, CHUNK_OVERHEAD, CIPHERTEXT_CHUNK_SIZE, CLEARTEXT_CHUNK_SIZE,
    HEADER_NONCE_SIZE, HEADER_PAYLOAD_SIZE, HEADER_SEAL_NONCE_SIZE, HEADER_SIZE,
};
use crate::error::CryptoError;

/// Reference cryptor bound to one vault master key
pub struct AesGcmCryptor {
    master_key: MasterKey32,
}

impl AesGcmCryptor {
    pub fn new(master_key: MasterKey32) -> Self {
        Self { master_key }
    }

    fn header_cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.master_key.expose_secret()))
    }

    fn chunk_cipher(header: &FileHeader) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(
            header.content_key().expose_secret(),
        ))
    }

    fn chunk_aad(index: u64, header: &FileHeader) -> [u8; 8 + HEADER_NONCE_SIZE] {
        let mut aad = [0u8; 8 + HEADER_NONCE_SIZE];
        aad[..8].copy_from_slice(&index.to_be_bytes());
        aad[8..].copy_from_slice(header.nonce());
        aad
    }
}

impl ContentCryptor for AesGcmCryptor {
    fn header_size(&self) -> usize {
        HEADER_SIZE
    }

    fn cleartext_chunk_size(&self) -> usize {
        CLEARTEXT_CHUNK_SIZE
    }

    fn ciphertext_chunk_size(&self) -> usize {
        CIPHERTEXT_CHUNK_SIZE
    }

    fn create_header(&self, cleartext_size: i64) -> FileHeader {
        let mut rng = rand::rng();
        let mut nonce = [0u8; HEADER_NONCE_SIZE];
        rng.fill_bytes(&mut nonce);
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut key);
        FileHeader::new(nonce, cleartext_size, ContentKey32::new(key))
    }

    fn decrypt_header(&self, ciphertext: &[u8]) -> Result<FileHeader> {
        if ciphertext.len() != HEADER_SIZE {
            return Err(CryptoError::InvalidHeader {
                reason: format!("expected {HEADER_SIZE} bytes, got {}", ciphertext.len()),
            });
        }

        let (nonce, rest) = ciphertext.split_at(HEADER_NONCE_SIZE);
        let (seal_nonce, sealed) = rest.split_at(HEADER_SEAL_NONCE_SIZE);

        let payload = self
            .header_cipher()
            .decrypt(
                Nonce::from_slice(seal_nonce),
                Payload {
                    msg: sealed,
                    aad: nonce,
                },
            )
            .map_err(|_| CryptoError::HeaderDecryption)?;

        if payload.len() != HEADER_PAYLOAD_SIZE {
            return Err(CryptoError::InvalidHeader {
                reason: format!(
                    "decrypted payload has {} bytes, expected {HEADER_PAYLOAD_SIZE}",
                    payload.len()
                ),
            });
        }

        let mut size_bytes = [0u8; 8];
        size_bytes.copy_from_slice(&payload[..8]);
        let mut key = [0u8; 32];
        key.copy_from_slice(&payload[8..]);
        let mut header_nonce = [0u8; HEADER_NONCE_SIZE];
        header_nonce.copy_from_slice(nonce);

        Ok(FileHeader::new(
            header_nonce,
            i64::from_be_bytes(size_bytes),
            ContentKey32::new(key),
        ))
    }

    fn encrypt_header(&self, header: &FileHeader) -> Result<Vec<u8>> {
        let mut seal_nonce = [0u8; HEADER_SEAL_NONCE_SIZE];
        rand::rng().fill_bytes(&mut seal_nonce);

        let mut payload = Vec::with_capacity(HEADER_PAYLOAD_SIZE);
        payload.extend_from_slice(&header.cleartext_size().to_be_bytes());
        payload.extend_from_slice(header.content_key().expose_secret());

        let sealed = self
            .header_cipher()
            .encrypt(
                Nonce::from_slice(&seal_nonce),
                Payload {
                    msg: &payload,
                    aad: header.nonce(),
                },
            )
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut out = Vec::with_capacity(HEADER_SIZE);
        out.extend_from_slice(header.nonce());
        out.extend_from_slice(&seal_nonce);
        out.extend_from_slice(&sealed);
        debug_assert_eq!(out.len(), HEADER_SIZE);
        Ok(out)
    }

    fn decrypt_chunk(
        &self,
        ciphertext: &[u8],
        index: u64,
        header: &FileHeader,
        is_final: bool,
    ) -> Result<PlainText> {
        let valid_length = if is_final {
            (CHUNK_OVERHEAD..=CIPHERTEXT_CHUNK_SIZE).contains(&ciphertext.len())
        } else {
            ciphertext.len() == CIPHERTEXT_CHUNK_SIZE
        };
        if !valid_length {
            return Err(CryptoError::IncompleteChunk {
                index,
                actual: ciphertext.len(),
            });
        }

        trace!(chunk = index, size = ciphertext.len(), is_final, "Decrypting chunk");

        let (nonce, sealed) = ciphertext.split_at(CHUNK_NONCE_SIZE);
        let aad = Self::chunk_aad(index, header);
        let cleartext = Self::chunk_cipher(header)
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed,
                    aad: &aad,
                },
            )
            .map_err(|_| CryptoError::ChunkDecryption { index })?;

        Ok(PlainText::new(cleartext))
    }

    fn encrypt_chunk(&self, cleartext: &[u8], index: u64, header: &FileHeader) -> Result<Vec<u8>> {
        if cleartext.len() > CLEARTEXT_CHUNK_SIZE {
            return Err(CryptoError::Encryption(format!(
                "chunk {index} holds {} bytes, maximum is {CLEARTEXT_CHUNK_SIZE}",
                cleartext.len()
            )));
        }

        let mut nonce = [0u8; CHUNK_NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce);
        let aad = Self::chunk_aad(index, header);

        let sealed = Self::chunk_cipher(header)
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: cleartext,
                    aad: &aad,
                },
            )
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut out = Vec::with_capacity(CHUNK_NONCE_SIZE + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }
}
