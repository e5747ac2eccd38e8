// src/upgrade/report.rs
use serde::Serialize;

use super::FileOutcome;

/// Per-outcome file counts of one upgrade step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpgradeReport {
    pub source_version: u32,
    pub target_version: u32,
    pub files_visited: u64,
    pub already_migrated: u64,
    pub skipped_invalid: u64,
    pub truncated: u64,
    pub reencrypted: u64,
    pub aborted_eof: u64,
}

impl UpgradeReport {
    pub fn new(source_version: u32, target_version: u32) -> Self {
        Self {
            source_version,
            target_version,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.files_visited += 1;
        match outcome {
            FileOutcome::AlreadyMigrated => self.already_migrated += 1,
            FileOutcome::SkippedInvalid => self.skipped_invalid += 1,
            FileOutcome::Truncated => self.truncated += 1,
            FileOutcome::Reencrypted => self.reencrypted += 1,
            FileOutcome::AbortedUnexpectedEof => self.aborted_eof += 1,
        }
    }

    /// Files whose layout and header were changed by this run
    pub fn migrated(&self) -> u64 {
        self.truncated + self.reencrypted
    }

    /// Files left in the old encoding that a retry will look at again
    pub fn left_behind(&self) -> u64 {
        self.skipped_invalid + self.aborted_eof
    }
}
