//! # contract: seams between the mirror logic and the outside world
//!
//! The mirror procedures only talk to the network through [`RemoteLister`] and to the
//! filesystem through [`FileWriter`]. Production code plugs in
//! [`crate::github::GithubClient`] and [`crate::writer::FsWriter`]; tests plug in
//! `mockall` mocks or in-memory fakes.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall`; the generated `MockRemoteLister` and
//!   `MockFileWriter` are exported under the default `test-export-mocks` feature.

use async_trait::async_trait;
use std::path::Path;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::Result;

/// Type indicator of a listing entry, as reported by the contents API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    #[serde(rename = "dir")]
    Directory,
    /// Submodules, symlinks and anything else the API may return.
    #[serde(other)]
    Other,
}

/// One node of a remote directory listing.
///
/// A present `download_url` marks a file. An absent one marks a directory whose
/// children are listed at `listing_url`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    /// Repository-relative path, e.g. `Ghidra/Processors/x86/data/languages/x86.slaspec`.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(rename = "url")]
    pub listing_url: String,
}

impl DirectoryEntry {
    pub fn is_file(&self) -> bool {
        self.download_url.is_some()
    }

    /// True for entries the tree walk should descend into.
    pub fn is_directory(&self) -> bool {
        self.download_url.is_none() && self.kind == EntryKind::Directory
    }
}

/// Read access to the remote repository.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RemoteLister: Send + Sync {
    /// Fetch and parse the listing at `url`.
    async fn list_directory(&self, url: &str) -> Result<Vec<DirectoryEntry>>;

    /// Fetch the raw content behind a `download_url`.
    async fn fetch_content(&self, url: &str) -> Result<Vec<u8>>;
}

/// Write access to the local tree.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait FileWriter: Send + Sync {
    /// Create `dir` and all of its missing parents.
    fn create_dir_all(&self, dir: &Path) -> Result<()>;

    /// Create an empty file at `path` unless one already exists.
    fn touch(&self, path: &Path) -> Result<()>;

    /// Truncate `path` and write `contents` to it.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}
