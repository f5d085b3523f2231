//! Recursive mirror of a remote subtree into a lower-cased local tree.
//!
//! The walk keeps an explicit LIFO worklist of pending listing URLs, so it is
//! depth-first with every directory's files written before its children are
//! listed. Each listing URL is fetched at most once.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::contract::{DirectoryEntry, FileWriter, RemoteLister};
use crate::error::{Result, SyncError};
use crate::synchronise::SyncReport;

#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Mirror paths are joined onto this directory.
    pub output_dir: PathBuf,
    pub excluded_extensions: Vec<String>,
    /// Depth of the root listing is 0.
    pub max_depth: Option<usize>,
}

/// Local path for a remote repository path: first component dropped, the rest
/// lower-cased. `root/sub/File.cpp` maps to `sub/file.cpp`.
///
/// Returns `None` when nothing remains after dropping the first component or
/// when the path would escape the output directory.
pub fn mirror_path(remote_path: &str) -> Option<PathBuf> {
    let mut parts = remote_path.split('/').filter(|p| !p.is_empty());
    parts.next()?;

    let mut local = PathBuf::new();
    for part in parts {
        let lowered = part.to_lowercase();
        let mut components = Path::new(&lowered).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => local.push(&lowered),
            _ => return None,
        }
    }

    if local.as_os_str().is_empty() {
        None
    } else {
        Some(local)
    }
}

/// True if the extension of `path` is in `excluded`, ignoring case.
pub fn is_excluded(path: &str, excluded: &[String]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| excluded.iter().any(|x| x.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

pub async fn mirror_tree<L, W>(
    lister: &L,
    writer: &W,
    root_listing_url: &str,
    options: &TreeOptions,
) -> Result<SyncReport>
where
    L: RemoteLister + ?Sized,
    W: FileWriter + ?Sized,
{
    let mut report = SyncReport::default();
    let mut pending: Vec<(String, usize)> = vec![(root_listing_url.to_string(), 0)];
    let mut visited: HashSet<String> = HashSet::new();

    while let Some((url, depth)) = pending.pop() {
        if !visited.insert(url.clone()) {
            tracing::warn!(url = %url, "Listing already visited, skipping");
            continue;
        }
        if let Some(max_depth) = options.max_depth {
            if depth > max_depth {
                tracing::error!(url = %url, depth, max_depth, "Directory depth limit exceeded");
                return Err(SyncError::DepthExceeded {
                    url,
                    depth,
                    max_depth,
                });
            }
        }

        let entries = lister.list_directory(&url).await?;
        report.listings += 1;

        let mut subdirectories = Vec::new();
        for entry in entries {
            if let Some(download_url) = entry.download_url.as_deref() {
                mirror_file(lister, writer, &entry, download_url, options, &mut report).await?;
            } else if entry.is_directory() {
                subdirectories.push(entry.listing_url);
            } else {
                tracing::warn!(path = %entry.path, kind = ?entry.kind, "Skipping entry without content");
            }
        }

        pending.extend(subdirectories.into_iter().rev().map(|u| (u, depth + 1)));
    }

    Ok(report)
}

async fn mirror_file<L, W>(
    lister: &L,
    writer: &W,
    entry: &DirectoryEntry,
    download_url: &str,
    options: &TreeOptions,
    report: &mut SyncReport,
) -> Result<()>
where
    L: RemoteLister + ?Sized,
    W: FileWriter + ?Sized,
{
    if is_excluded(&entry.path, &options.excluded_extensions) {
        tracing::debug!(path = %entry.path, "Excluded by extension");
        report.excluded += 1;
        return Ok(());
    }
    let Some(relative) = mirror_path(&entry.path) else {
        tracing::warn!(path = %entry.path, "No local path for remote entry, skipping");
        report.skipped += 1;
        return Ok(());
    };
    let path = options.output_dir.join(relative);
    if let Some(parent) = path.parent() {
        writer.create_dir_all(parent)?;
    }
    writer.touch(&path)?;

    tracing::info!(path = %path.display(), "updating file");
    let content = lister.fetch_content(download_url).await?;
    writer.write(&path, &content)?;
    report.updated.push(path);
    Ok(())
}
