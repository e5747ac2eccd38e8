// src/upgrade/mod.rs
//! In-place vault format upgrades
//!
//! Each [`UpgradeStrategy`] moves a vault exactly one format version forward.
//! [`UpgradeChain`] orders them by source version and applies the contiguous
//! run needed to reach the current format.
mod chain;
mod migrate;
mod report;
mod selector;
mod v4_to_v5;
mod vault;

pub use chain::{ChainReport, UpgradeChain};
pub use migrate::{
    classify, commit_header, migrate_file, read_header, rewrite_last_chunk, FileOutcome,
    LastChunkPlan, MigrationDecision, TailRewrite,
};
pub use report::UpgradeReport;
pub use selector::{Candidate, Candidates, FileSelector};
pub use v4_to_v5::UpgradeVersion4To5;
pub use vault::Vault;

use crate::error::UpgradeError;

/// One source-version → target-version transformation
pub trait UpgradeStrategy {
    fn source_version(&self) -> u32;

    fn target_version(&self) -> u32;

    /// User-facing description of what the upgrade does; no side effects
    fn notice(&self, vault: &Vault) -> String;

    /// Migrate `vault` in place. Safe to repeat on a partially or fully
    /// migrated vault.
    fn upgrade(&self, vault: &Vault) -> Result<UpgradeReport, UpgradeError>;

    fn is_applicable(&self, vault: &Vault) -> bool {
        vault.version() == self.source_version()
    }
}
