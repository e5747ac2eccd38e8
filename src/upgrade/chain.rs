// src/upgrade/chain.rs
//! Registry of upgrade steps, keyed by source version

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{error, info};

use super::{UpgradeReport, UpgradeStrategy, UpgradeVersion4To5, Vault};
use crate::aliases::MasterKey32;
use crate::config::{Config, Localization};
use crate::consts::CURRENT_VAULT_VERSION;
use crate::error::{CoreError, UpgradeError};

const MSG_NO_PATH: &str = "upgrade.err.no_path";

/// Reports of every step applied by one [`UpgradeChain::upgrade`] call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub reached_version: u32,
    pub steps: Vec<UpgradeReport>,
}

pub struct UpgradeChain {
    steps: BTreeMap<u32, Box<dyn UpgradeStrategy>>,
    current_version: u32,
    localization: Localization,
}

impl UpgradeChain {
    pub fn new(current_version: u32, localization: Localization) -> Self {
        Self {
            steps: BTreeMap::new(),
            current_version,
            localization,
        }
    }

    /// Every built-in step, targeting [`CURRENT_VAULT_VERSION`]
    pub fn standard(master_key: MasterKey32, config: &Config) -> Result<Self, CoreError> {
        let mut chain = Self::new(CURRENT_VAULT_VERSION, Localization::from_config(config));
        chain.register(Box::new(UpgradeVersion4To5::with_master_key(
            master_key, config,
        )?));
        Ok(chain)
    }

    /// Add a step. Returns `false` (and drops the step) if its source version
    /// is taken or it does not move forward.
    pub fn register(&mut self, step: Box<dyn UpgradeStrategy>) -> bool {
        let source = step.source_version();
        if step.target_version() <= source || self.steps.contains_key(&source) {
            return false;
        }
        self.steps.insert(source, step);
        true
    }

    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    pub fn needs_upgrade(&self, vault: &Vault) -> bool {
        vault.version() < self.current_version
    }

    /// Contiguous steps taking `from` to the current version, in order
    pub fn plan(&self, from: u32) -> Option<Vec<&dyn UpgradeStrategy>> {
        let mut version = from;
        let mut plan = Vec::new();
        while version < self.current_version {
            let step = self.steps.get(&version)?;
            plan.push(step.as_ref());
            version = step.target_version();
        }
        (version == self.current_version).then_some(plan)
    }

    /// Notices of all steps `vault` would go through
    pub fn notices(&self, vault: &Vault) -> Result<Vec<String>, UpgradeError> {
        let plan = self.plan_for(vault)?;
        Ok(plan
            .iter()
            .map(|step| step.notice(&vault.at_version(step.source_version())))
            .collect())
    }

    /// Apply every planned step in increasing version order; stops at the
    /// first failure. Recording the new version is up to the caller.
    pub fn upgrade(&self, vault: &Vault) -> Result<ChainReport, UpgradeError> {
        let plan = self.plan_for(vault)?;
        let mut report = ChainReport {
            reached_version: vault.version(),
            steps: Vec::with_capacity(plan.len()),
        };

        for step in plan {
            let view = vault.at_version(step.source_version());
            info!(
                "Upgrading {} from version {} to {}",
                vault.path().display(),
                step.source_version(),
                step.target_version()
            );
            let step_report = step.upgrade(&view).inspect_err(|e| {
                error!(
                    "Upgrade {} → {} failed: {e}",
                    step.source_version(),
                    step.target_version()
                );
            })?;
            report.steps.push(step_report);
            report.reached_version = step.target_version();
        }

        Ok(report)
    }

    fn plan_for(&self, vault: &Vault) -> Result<Vec<&dyn UpgradeStrategy>, UpgradeError> {
        self.plan(vault.version())
            .ok_or_else(|| UpgradeError::NoUpgradePath {
                message: self.localization.format(MSG_NO_PATH, &vault.name()),
                from: vault.version(),
                to: self.current_version,
            })
    }
}
