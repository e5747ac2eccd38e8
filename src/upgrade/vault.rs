// src/upgrade/vault.rs
use std::path::{Path, PathBuf};

/// A vault root together with its detected format version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    path: PathBuf,
    version: u32,
}

impl Vault {
    pub fn new(path: impl Into<PathBuf>, version: u32) -> Self {
        Self {
            path: path.into(),
            version,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Last path component, used in user-facing messages
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn data_dir(&self, dir_name: &str) -> PathBuf {
        self.path.join(dir_name)
    }

    /// Same vault, seen as if it were at `version`
    pub fn at_version(&self, version: u32) -> Self {
        Self {
            path: self.path.clone(),
            version,
        }
    }
}
