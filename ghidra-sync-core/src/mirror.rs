//! Allow-list sync: refresh local files that already exist, never add new ones.

use std::path::PathBuf;

use crate::contract::{FileWriter, RemoteLister};
use crate::error::Result;
use crate::inventory::LocalFileSet;
use crate::synchronise::SyncReport;

/// A local directory and the files it held when the run started.
#[derive(Debug, Clone)]
pub struct MirrorTarget {
    pub dir: PathBuf,
    pub files: LocalFileSet,
}

impl MirrorTarget {
    pub fn collect(dir: PathBuf) -> Result<Self> {
        let files = LocalFileSet::collect(&dir)?;
        Ok(Self { dir, files })
    }
}

/// List `listing_url` once and overwrite every local file whose name appears in it.
///
/// Content is fetched once per remote entry even when several targets hold the name.
pub async fn mirror_listing<L, W>(
    lister: &L,
    writer: &W,
    listing_url: &str,
    targets: &[MirrorTarget],
) -> Result<SyncReport>
where
    L: RemoteLister + ?Sized,
    W: FileWriter + ?Sized,
{
    let mut report = SyncReport::default();
    let entries = lister.list_directory(listing_url).await?;
    report.listings += 1;

    for entry in &entries {
        let Some(download_url) = entry.download_url.as_deref() else {
            tracing::debug!(name = %entry.name, "Skipping directory entry");
            continue;
        };

        let matching: Vec<&MirrorTarget> = targets
            .iter()
            .filter(|t| t.files.contains(&entry.name))
            .collect();
        if matching.is_empty() {
            report.skipped += 1;
            continue;
        }

        let content = lister.fetch_content(download_url).await?;
        for target in matching {
            let path = target.dir.join(&entry.name);
            tracing::info!(path = %path.display(), "updating file");
            writer.write(&path, &content)?;
            report.updated.push(path);
        }
    }

    Ok(report)
}
