// src/upgrade/v4_to_v5.rs
//! Vault format 4 → 5: explicit cleartext sizes with padded tails become
//! size sentinels with exact-division chunk layouts

use std::fs::OpenOptions;

use tracing::{error, info};

use super::migrate::{migrate_file, FileOutcome};
use super::selector::{Candidate, FileSelector};
use super::{UpgradeReport, UpgradeStrategy, Vault};
use crate::aliases::MasterKey32;
use crate::config::{Config, Localization};
use crate::crypto::{AesGcmCryptor, ContentCryptor};
use crate::error::{CoreError, UpgradeError};

const SOURCE_VERSION: u32 = 4;
const TARGET_VERSION: u32 = 5;

const MSG_NOTICE: &str = "upgrade.version4to5.msg";
const MSG_IO: &str = "upgrade.version4to5.err.io";
const MSG_CRYPTO: &str = "upgrade.version4to5.err.crypto";
const MSG_VERSION_MISMATCH: &str = "upgrade.err.version_mismatch";

/// The 4 → 5 step, owning a cryptor for the format-4 file layout
pub struct UpgradeVersion4To5<C: ContentCryptor> {
    cryptor: C,
    selector: FileSelector,
    data_dir: String,
    localization: Localization,
}

impl UpgradeVersion4To5<AesGcmCryptor> {
    /// Step for a vault unlocked with `master_key`, configured from `config`
    pub fn with_master_key(master_key: MasterKey32, config: &Config) -> Result<Self, CoreError> {
        Self::new(AesGcmCryptor::new(master_key), config)
    }
}

impl<C: ContentCryptor> UpgradeVersion4To5<C> {
    pub fn new(cryptor: C, config: &Config) -> Result<Self, CoreError> {
        let selector =
            FileSelector::from_pattern(&config.layout.filename_pattern, cryptor.header_size())?;
        Ok(Self {
            cryptor,
            selector,
            data_dir: config.layout.data_dir.clone(),
            localization: Localization::from_config(config),
        })
    }

    pub fn cryptor(&self) -> &C {
        &self.cryptor
    }

    fn migrate_candidate(&self, candidate: &Candidate) -> Result<FileOutcome, CoreError> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&candidate.path)?;
        migrate_file(&mut file, &candidate.path, candidate.size, &self.cryptor)
    }

    fn failure(&self, vault: &Vault, err: CoreError) -> UpgradeError {
        error!("Migration failed: {err}");
        match err {
            CoreError::Crypto(source) => UpgradeError::Crypto {
                message: self.localization.format(MSG_CRYPTO, &vault.name()),
                source,
            },
            CoreError::Io(source) => UpgradeError::Io {
                message: self.localization.format(MSG_IO, &vault.name()),
                source,
            },
            other => UpgradeError::Io {
                message: self.localization.format(MSG_IO, &vault.name()),
                source: std::io::Error::other(other.to_string()),
            },
        }
    }
}

impl<C: ContentCryptor> UpgradeStrategy for UpgradeVersion4To5<C> {
    fn source_version(&self) -> u32 {
        SOURCE_VERSION
    }

    fn target_version(&self) -> u32 {
        TARGET_VERSION
    }

    fn notice(&self, vault: &Vault) -> String {
        self.localization.format(MSG_NOTICE, &vault.name())
    }

    fn upgrade(&self, vault: &Vault) -> Result<UpgradeReport, UpgradeError> {
        if !self.is_applicable(vault) {
            return Err(UpgradeError::VersionMismatch {
                message: self.localization.format(MSG_VERSION_MISMATCH, &vault.name()),
                expected: SOURCE_VERSION,
                found: vault.version(),
            });
        }

        let mut report = UpgradeReport::new(SOURCE_VERSION, TARGET_VERSION);
        let data_dir = vault.data_dir(&self.data_dir);
        let candidates = self
            .selector
            .candidates(&data_dir)
            .map_err(|e| self.failure(vault, e.into()))?;

        for candidate in candidates {
            let candidate = candidate.map_err(|e| self.failure(vault, e.into()))?;
            let outcome = self
                .migrate_candidate(&candidate)
                .map_err(|e| self.failure(vault, e))?;
            report.record(outcome);
        }

        info!(
            "Migration finished: {} migrated, {} already migrated, {} left behind.",
            report.migrated(),
            report.already_migrated,
            report.left_behind()
        );
        Ok(report)
    }
}
