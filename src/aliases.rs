// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout vault-format-upgrade.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(MasterKey32, 32); // 256-bit vault master key (seals file headers)
fixed_alias!(ContentKey32, 32); // 256-bit per-file content key (seals chunks)

// Dynamic secrets
dynamic_alias!(PlainText, Vec<u8>); // decrypted chunk or file content
