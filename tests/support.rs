// tests/support.rs
//! Test utilities — legacy (format 4) file writer, counting cryptor, vault fixtures
#![allow(dead_code)] // each test binary uses a different subset

use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use vault_format_upgrade::crypto::{AesGcmCryptor, ContentCryptor, FileHeader};
use vault_format_upgrade::error::CryptoError;
use vault_format_upgrade::{MasterKey32, PlainText};

pub const CL: usize = vault_format_upgrade::consts::CLEARTEXT_CHUNK_SIZE;
pub const CT: usize = vault_format_upgrade::consts::CIPHERTEXT_CHUNK_SIZE;
pub const HS: usize = vault_format_upgrade::consts::HEADER_SIZE;

pub fn master_key(seed: u8) -> MasterKey32 {
    MasterKey32::new([seed; 32])
}

pub fn cryptor() -> AesGcmCryptor {
    AesGcmCryptor::new(master_key(7))
}

/// Deterministic, non-repeating-per-chunk content
pub fn sample_plaintext(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

/// Write `header` followed by `payload` encrypted in full chunks
pub fn write_with_header<C: ContentCryptor>(
    path: &Path,
    cryptor: &C,
    header: &FileHeader,
    payload: &[u8],
) -> Vec<u8> {
    let mut out = cryptor.encrypt_header(header).expect("encrypt header");
    for (index, chunk) in payload.chunks(cryptor.cleartext_chunk_size()).enumerate() {
        out.extend(
            cryptor
                .encrypt_chunk(chunk, index as u64, header)
                .expect("encrypt chunk"),
        );
    }
    fs::write(path, &out).expect("write encrypted file");
    out
}

/// Write a format-4 file: explicit cleartext size, then content + `padding` random bytes
pub fn write_legacy_file<C: ContentCryptor>(
    path: &Path,
    cryptor: &C,
    plaintext: &[u8],
    padding: usize,
) -> Vec<u8> {
    let header = cryptor.create_header(plaintext.len() as i64);
    let mut payload = plaintext.to_vec();
    payload.extend(random_bytes(padding));
    write_with_header(path, cryptor, &header, &payload)
}

/// Write a format-5 file: size sentinel, no padding
pub fn write_current_file<C: ContentCryptor>(path: &Path, cryptor: &C, plaintext: &[u8]) -> Vec<u8> {
    let header = cryptor.create_header(-1);
    write_with_header(path, cryptor, &header, plaintext)
}

/// Number of chunk operations a cryptor has performed
#[derive(Debug, Default)]
pub struct CallCounts {
    pub decrypt_chunk: AtomicUsize,
    pub encrypt_chunk: AtomicUsize,
    pub encrypt_header: AtomicUsize,
}

impl CallCounts {
    pub fn chunk_calls(&self) -> usize {
        self.decrypt_chunk.load(Ordering::SeqCst) + self.encrypt_chunk.load(Ordering::SeqCst)
    }
}

/// Forwards to [`AesGcmCryptor`] and counts calls
pub struct CountingCryptor {
    inner: AesGcmCryptor,
    pub counts: Arc<CallCounts>,
}

impl CountingCryptor {
    pub fn new(inner: AesGcmCryptor) -> Self {
        Self {
            inner,
            counts: Arc::default(),
        }
    }
}

impl ContentCryptor for CountingCryptor {
    fn header_size(&self) -> usize {
        self.inner.header_size()
    }

    fn cleartext_chunk_size(&self) -> usize {
        self.inner.cleartext_chunk_size()
    }

    fn ciphertext_chunk_size(&self) -> usize {
        self.inner.ciphertext_chunk_size()
    }

    fn create_header(&self, cleartext_size: i64) -> FileHeader {
        self.inner.create_header(cleartext_size)
    }

    fn decrypt_header(&self, ciphertext: &[u8]) -> Result<FileHeader, CryptoError> {
        self.inner.decrypt_header(ciphertext)
    }

    fn encrypt_header(&self, header: &FileHeader) -> Result<Vec<u8>, CryptoError> {
        self.counts.encrypt_header.fetch_add(1, Ordering::SeqCst);
        self.inner.encrypt_header(header)
    }

    fn decrypt_chunk(
        &self,
        ciphertext: &[u8],
        index: u64,
        header: &FileHeader,
        is_final: bool,
    ) -> Result<PlainText, CryptoError> {
        self.counts.decrypt_chunk.fetch_add(1, Ordering::SeqCst);
        self.inner.decrypt_chunk(ciphertext, index, header, is_final)
    }

    fn encrypt_chunk(
        &self,
        cleartext: &[u8],
        index: u64,
        header: &FileHeader,
    ) -> Result<Vec<u8>, CryptoError> {
        self.counts.encrypt_chunk.fetch_add(1, Ordering::SeqCst);
        self.inner.encrypt_chunk(cleartext, index, header)
    }
}

/// Base-32 storage name derived from `n`, e.g. `AAAAAAAC` + `IDIDIDID`
pub fn storage_name(n: u32) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
    let mut name = String::from("IDIDIDID");
    let mut v = n;
    let mut group = Vec::with_capacity(8);
    for _ in 0..8 {
        group.push(ALPHABET[(v % 32) as usize]);
        v /= 32;
    }
    group.reverse();
    name.push_str(std::str::from_utf8(&group).expect("ascii"));
    name
}

/// Vault directory tree on a temp dir
pub struct TestVault {
    dir: TempDir,
}

impl TestVault {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp vault"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("d")
    }

    /// Path below the data dir, parents created
    pub fn data_path(&self, relative: &str) -> PathBuf {
        let path = self.data_dir().join(relative);
        fs::create_dir_all(path.parent().expect("has parent")).expect("create data subdir");
        path
    }

    pub fn add_legacy_file<C: ContentCryptor>(
        &self,
        relative: &str,
        cryptor: &C,
        plaintext: &[u8],
        padding: usize,
    ) -> PathBuf {
        let path = self.data_path(relative);
        write_legacy_file(&path, cryptor, plaintext, padding);
        path
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}
