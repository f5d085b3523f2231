//! Top-level orchestration: pick a mode, build listing URLs, run the mirror.
//!
//! # Modes
//! - [`SyncMode::Decompiler`]: allow-list refresh of the configured target directories
//!   (see [`crate::mirror`]).
//! - [`SyncMode::Processors`]: full mirror of the processor definitions tree
//!   (see [`crate::tree`]).
//!
//! # Error Handling
//! Fail fast. The first error is returned as is; nothing already written is rolled back.

use std::path::PathBuf;
use tracing::info;

use crate::config::SyncConfig;
use crate::contract::{FileWriter, RemoteLister};
use crate::error::Result;
use crate::mirror::{mirror_listing, MirrorTarget};
use crate::tree::{mirror_tree, TreeOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Decompiler,
    Processors,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Local files written, in write order.
    pub updated: Vec<PathBuf>,
    /// Listing requests issued.
    pub listings: usize,
    /// Remote files not mirrored because no local counterpart exists or no local path fits.
    pub skipped: usize,
    /// Remote files left out by extension.
    pub excluded: usize,
}

pub async fn synchronise<L, W>(
    config: &SyncConfig,
    mode: SyncMode,
    lister: &L,
    writer: &W,
) -> Result<SyncReport>
where
    L: RemoteLister + ?Sized,
    W: FileWriter + ?Sized,
{
    info!(?mode, "[SYNC] Starting synchronisation");

    let report = match mode {
        SyncMode::Decompiler => {
            // Inventory first: a missing target directory fails before any request.
            let targets = config
                .decompiler
                .targets
                .iter()
                .cloned()
                .map(MirrorTarget::collect)
                .collect::<Result<Vec<_>>>()?;
            let url = config.listing_url(&config.decompiler.remote_path)?;
            mirror_listing(lister, writer, &url, &targets).await?
        }
        SyncMode::Processors => {
            let url = config.listing_url(&config.processors.remote_path)?;
            let options = TreeOptions {
                output_dir: config.processors.output_dir.clone(),
                excluded_extensions: config.processors.excluded_extensions.clone(),
                max_depth: config.processors.max_depth,
            };
            mirror_tree(lister, writer, &url, &options).await?
        }
    };

    info!(
        updated = report.updated.len(),
        listings = report.listings,
        skipped = report.skipped,
        excluded = report.excluded,
        "[SYNC] Synchronisation complete"
    );
    Ok(report)
}
