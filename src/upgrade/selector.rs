// src/upgrade/selector.rs
//! Picks the encrypted files an upgrade step has to look at
//!
//! A candidate is a regular file whose name matches the storage-ID scheme and
//! which is larger than one header, i.e. holds at least one chunk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::CoreError;

/// A file handed to the block migrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct FileSelector {
    pattern: Regex,
    header_size: u64,
}

impl FileSelector {
    pub fn new(pattern: Regex, header_size: usize) -> Self {
        Self {
            pattern,
            header_size: header_size as u64,
        }
    }

    pub fn from_pattern(pattern: &str, header_size: usize) -> Result<Self, CoreError> {
        Ok(Self::new(Regex::new(pattern)?, header_size))
    }

    pub fn is_candidate(&self, file_name: &str, size: u64) -> bool {
        self.pattern.is_match(file_name) && size > self.header_size
    }

    /// Lazily walk `dir`. A missing directory yields nothing; any other
    /// failure to stat it, or a `dir` that is not a directory, is an error.
    pub fn candidates(&self, dir: &Path) -> io::Result<Candidates<'_>> {
        let walker = match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => Some(WalkDir::new(dir).into_iter()),
            Ok(_) => {
                return Err(io::Error::other(format!(
                    "{} is not a directory",
                    dir.display()
                )))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No directory at {}, nothing to select.", dir.display());
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Candidates {
            selector: self,
            walker,
        })
    }
}

/// Iterator over the candidates below one directory
pub struct Candidates<'a> {
    selector: &'a FileSelector,
    walker: Option<walkdir::IntoIter>,
}

impl Iterator for Candidates<'_> {
    type Item = io::Result<Candidate>;

    fn next(&mut self) -> Option<Self::Item> {
        let walker = self.walker.as_mut()?;
        loop {
            let entry = match walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => return Some(Err(e.into())),
            };
            let matches = self
                .selector
                .is_candidate(&entry.file_name().to_string_lossy(), size);
            if matches {
                return Some(Ok(Candidate {
                    path: entry.into_path(),
                    size,
                }));
            }
            trace!("Not a candidate: {}", entry.path().display());
        }
    }
}
