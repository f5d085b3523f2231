use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};

/// Names of the files found directly inside one local directory.
///
/// Built fresh on every run and only used for membership tests. Subdirectories
/// and names that are not valid UTF-8 are left out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocalFileSet {
    names: BTreeSet<String>,
}

impl LocalFileSet {
    /// Read one level of `dir`. A missing directory is an error.
    pub fn collect(dir: &Path) -> Result<Self> {
        let read_dir = fs::read_dir(dir).map_err(|e| {
            tracing::error!(error = ?e, path = %dir.display(), "Failed to read local directory");
            SyncError::filesystem(dir, e)
        })?;

        let mut names = BTreeSet::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| SyncError::filesystem(dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| SyncError::filesystem(entry.path(), e))?;
            if file_type.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => {
                    names.insert(name);
                }
                Err(raw) => {
                    tracing::warn!(name = ?raw, dir = %dir.display(), "Ignoring non UTF-8 file name");
                }
            }
        }

        tracing::debug!(dir = %dir.display(), files = names.len(), "Collected local inventory");
        Ok(Self { names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
