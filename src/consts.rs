// src/consts.rs
//! Shared constants — on-disk format geometry and vault layout defaults

/// Nonce stored in cleartext at the start of every file header; identifies the file
pub const HEADER_NONCE_SIZE: usize = 12;

/// Fresh nonce used to seal the header payload
pub const HEADER_SEAL_NONCE_SIZE: usize = 12;

/// Per-chunk random nonce
pub const CHUNK_NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag
pub const TAG_SIZE: usize = 16;

/// Sealed header payload: cleartext size (i64 BE) + content key
pub const HEADER_PAYLOAD_SIZE: usize = 8 + 32;

/// Total on-disk header size
pub const HEADER_SIZE: usize =
    HEADER_NONCE_SIZE + HEADER_SEAL_NONCE_SIZE + HEADER_PAYLOAD_SIZE + TAG_SIZE;

/// Cleartext bytes per chunk (32 KiB)
pub const CLEARTEXT_CHUNK_SIZE: usize = 32 * 1024;

/// Bytes added to every ciphertext chunk (nonce + tag)
pub const CHUNK_OVERHEAD: usize = CHUNK_NONCE_SIZE + TAG_SIZE;

/// Ciphertext bytes per full chunk
pub const CIPHERTEXT_CHUNK_SIZE: usize = CLEARTEXT_CHUNK_SIZE + CHUNK_OVERHEAD;

/// Header cleartext size meaning "derive the size from the file length"
// Negative = new encoding, non-negative = old padded encoding
pub const UNKNOWN_CLEARTEXT_SIZE: i64 = -1;

/// Vault format version produced by this crate's newest upgrade step
pub const CURRENT_VAULT_VERSION: u32 = 5;

/// Name of the encrypted-data subtree inside a vault
pub const DEFAULT_DATA_DIR: &str = "d";

/// Storage-ID filename scheme: base-32 runs grouped by 8, optionally `=`-padded.
/// Matched as a prefix so `.lng` and conflict-suffixed names are still picked up.
pub const STORAGE_ID_PATTERN: &str = "^([A-Z2-7]{8})*[A-Z2-7=]{8}";
