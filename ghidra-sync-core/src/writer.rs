use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::contract::FileWriter;
use crate::error::{Result, SyncError};

/// [`FileWriter`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl FileWriter for FsWriter {
    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| {
            tracing::error!(error = ?e, path = %dir.display(), "Failed to create directory");
            SyncError::filesystem(dir, e)
        })
    }

    fn touch(&self, path: &Path) -> Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(error = ?e, path = %path.display(), "Failed to create placeholder file");
                SyncError::filesystem(path, e)
            })
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).map_err(|e| {
            tracing::error!(error = ?e, path = %path.display(), "Failed to write file");
            SyncError::filesystem(path, e)
        })
    }
}
