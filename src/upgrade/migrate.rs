// src/upgrade/migrate.rs
//! Per-file block migration: explicit-size header + padded tail → size
//! sentinel + exact-division chunk layout
//!
//! Only the tail of a file ever changes. Every chunk before the new last
//! chunk stays byte-identical; the last chunk is either cut off by a plain
//! truncation or decrypted, shortened and re-encrypted at the same index.
//! The header is rewritten last, so an interrupted run leaves a file that
//! [`classify`] still recognizes as needing migration.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{error, info, warn};

use crate::crypto::{ContentCryptor, FileHeader};
use crate::error::CoreError;

pub type Result<T> = std::result::Result<T, CoreError>;

/// What to do with one file, derived from its header and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationDecision {
    /// Header already carries the size sentinel
    AlreadyMigrated,
    /// Header claims more cleartext than the file can hold
    InvalidSize { cleartext_size: u64, file_size: u64 },
    /// New layout ends on a chunk boundary: cut the file at `new_eof`
    TruncateOnly { new_eof: u64 },
    /// Last chunk must be re-encrypted without padding
    ReencryptLastChunk(LastChunkPlan),
}

/// Chunk-boundary arithmetic for a file whose new last chunk is partial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastChunkPlan {
    pub chunk_index: u64,
    /// Offset of the last chunk, header included
    pub begin: u64,
    pub new_eof: u64,
    /// Cleartext bytes the re-encrypted chunk holds; in `1..cleartext_chunk_size`
    pub cleartext_len: usize,
}

impl LastChunkPlan {
    /// Ciphertext bytes of the new last chunk
    pub fn ciphertext_len(&self) -> u64 {
        self.new_eof - self.begin
    }
}

/// Result of the tail rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailRewrite {
    Rewritten,
    /// Fewer bytes on disk than the header implies; nothing was written.
    /// `available` counts the bytes found from the start of the last chunk.
    UnexpectedEof { available: u64 },
}

/// Observable result of [`migrate_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    AlreadyMigrated,
    SkippedInvalid,
    Truncated,
    Reencrypted,
    AbortedUnexpectedEof,
}

/// Read and decrypt the header at offset 0
pub fn read_header<C: ContentCryptor + ?Sized>(file: &mut File, cryptor: &C) -> Result<FileHeader> {
    let mut buf = vec![0u8; cryptor.header_size()];
    file.seek(SeekFrom::Start(0))?;
    file.read_exact(&mut buf)?;
    Ok(cryptor.decrypt_header(&buf)?)
}

/// Decide the migration for a file of `file_size` bytes carrying `header`
pub fn classify<C: ContentCryptor + ?Sized>(
    header: &FileHeader,
    file_size: u64,
    cryptor: &C,
) -> MigrationDecision {
    let Some(cleartext_size) = header.explicit_cleartext_size() else {
        return MigrationDecision::AlreadyMigrated;
    };

    let header_size = cryptor.header_size() as u64;
    if cleartext_size > file_size.saturating_sub(header_size) {
        return MigrationDecision::InvalidSize {
            cleartext_size,
            file_size,
        };
    }

    let ciphertext_chunk = cryptor.ciphertext_chunk_size() as u64;
    let cleartext_chunk = cryptor.cleartext_chunk_size() as u64;
    let new_ciphertext_size = cryptor.ciphertext_size_for(cleartext_size);
    let new_eof = header_size + new_ciphertext_size;
    let new_full_chunks = new_ciphertext_size / ciphertext_chunk;
    let remainder = new_ciphertext_size % ciphertext_chunk;

    if remainder == 0 {
        return MigrationDecision::TruncateOnly { new_eof };
    }

    let begin = header_size + new_full_chunks * ciphertext_chunk;
    let cleartext_len = (cleartext_size % cleartext_chunk) as usize;
    debug_assert!(begin < new_eof);
    debug_assert!(cleartext_len > 0 && (cleartext_len as u64) < cleartext_chunk);

    MigrationDecision::ReencryptLastChunk(LastChunkPlan {
        chunk_index: new_full_chunks,
        begin,
        new_eof,
        cleartext_len,
    })
}

/// Replace the chunk at `plan.begin` with an unpadded re-encryption of its
/// first `plan.cleartext_len` cleartext bytes, then cut the file there.
///
/// On [`TailRewrite::UnexpectedEof`] the file is untouched.
pub fn rewrite_last_chunk<C: ContentCryptor + ?Sized>(
    file: &mut File,
    plan: &LastChunkPlan,
    header: &FileHeader,
    cryptor: &C,
) -> Result<TailRewrite> {
    let mut ciphertext = Vec::with_capacity(cryptor.ciphertext_chunk_size());
    file.seek(SeekFrom::Start(plan.begin))?;
    std::io::Read::by_ref(file)
        .take(cryptor.ciphertext_chunk_size() as u64)
        .read_to_end(&mut ciphertext)?;

    let available = ciphertext.len() as u64;
    if available < plan.ciphertext_len() {
        return Ok(TailRewrite::UnexpectedEof { available });
    }

    let cleartext = cryptor.decrypt_chunk(&ciphertext, plan.chunk_index, header, true)?;
    let cleartext = cleartext.expose_secret();
    if cleartext.len() < plan.cleartext_len {
        return Ok(TailRewrite::UnexpectedEof { available });
    }

    let new_chunk =
        cryptor.encrypt_chunk(&cleartext[..plan.cleartext_len], plan.chunk_index, header)?;
    debug_assert_eq!(new_chunk.len() as u64, plan.ciphertext_len());

    file.set_len(plan.begin)?;
    file.seek(SeekFrom::Start(plan.begin))?;
    file.write_all(&new_chunk)?;
    Ok(TailRewrite::Rewritten)
}

/// Mark the header as using the size sentinel and write it back at offset 0
pub fn commit_header<C: ContentCryptor + ?Sized>(
    file: &mut File,
    header: &mut FileHeader,
    cryptor: &C,
) -> Result<()> {
    header.mark_size_unknown();
    let encrypted = cryptor.encrypt_header(header)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&encrypted)?;
    file.sync_data()?;
    Ok(())
}

/// Migrate one file opened read-write. File-scoped problems are logged and
/// reported as an outcome; I/O and decryption failures are returned.
pub fn migrate_file<C: ContentCryptor + ?Sized>(
    file: &mut File,
    path: &Path,
    file_size: u64,
    cryptor: &C,
) -> Result<FileOutcome> {
    let mut header = read_header(file, cryptor)?;
    let cleartext_size = header.cleartext_size();

    let outcome = match classify(&header, file_size, cryptor) {
        MigrationDecision::AlreadyMigrated => {
            info!("Skipping already migrated file {}.", path.display());
            return Ok(FileOutcome::AlreadyMigrated);
        }
        MigrationDecision::InvalidSize {
            cleartext_size,
            file_size,
        } => {
            warn!(
                "Skipping file {} with invalid file size {cleartext_size}/{file_size}",
                path.display()
            );
            return Ok(FileOutcome::SkippedInvalid);
        }
        MigrationDecision::TruncateOnly { new_eof } => {
            info!(
                "Migrating {} of cleartext size {cleartext_size}: truncating to new ciphertext size {new_eof}",
                path.display()
            );
            file.set_len(new_eof)?;
            FileOutcome::Truncated
        }
        MigrationDecision::ReencryptLastChunk(plan) => {
            info!(
                "Migrating {} of cleartext size {cleartext_size}: re-encrypting chunk {}, new ciphertext size {}",
                path.display(),
                plan.chunk_index,
                plan.new_eof
            );
            match rewrite_last_chunk(file, &plan, &header, cryptor)? {
                TailRewrite::Rewritten => FileOutcome::Reencrypted,
                TailRewrite::UnexpectedEof { available } => {
                    // header must stay untouched so the file is still valid
                    error!(
                        "Reached EOF in {} at position {}/{}",
                        path.display(),
                        plan.begin + available,
                        plan.new_eof
                    );
                    return Ok(FileOutcome::AbortedUnexpectedEof);
                }
            }
        }
    };

    // tail must be on disk before the header claims the new layout
    file.sync_data()?;
    commit_header(file, &mut header, cryptor)?;
    Ok(outcome)
}
