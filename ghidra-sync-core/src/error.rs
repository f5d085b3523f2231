//! Error types for ghidra-sync-core
//!
//! Every failure aborts the run. Files written before the failure stay on disk.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a mirror run
#[derive(Error, Debug)]
pub enum SyncError {
    /// Connection or transport failure
    #[error("Request to '{url}' failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Listing endpoint answered with a non-success status
    #[error("Listing '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body is not a listing
    #[error("Failed to parse listing from '{url}': {reason}")]
    Parse { url: String, reason: String },

    /// Configured token cannot be sent as a header
    #[error("Authorization token is not a valid header value: {reason}")]
    InvalidToken { reason: String },

    /// Configured API base or paths do not form a URL
    #[error("Invalid listing URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Local filesystem failure
    #[error("Filesystem error at '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Worklist went deeper than the configured limit
    #[error("Directory '{url}' is at depth {depth}, beyond the limit of {max_depth}")]
    DepthExceeded {
        url: String,
        depth: usize,
        max_depth: usize,
    },
}

impl SyncError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for mirror operations
pub type Result<T> = std::result::Result<T, SyncError>;
