//! This module implements the CLI interface for ghidra-sync: argument parsing, config
//! loading, client construction and the user-visible summary.
//!
//! All mirror logic lives in the [`ghidra-sync-core`] crate.
//!
//! ## How To Use
//! - From the repository root of the consuming project: `ghidra-sync` refreshes the
//!   vendored decompiler sources, `ghidra-sync --cpus` mirrors the processor definitions.
//! - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
//!
//! [`ghidra-sync-core`]: ../../ghidra-sync-core/
use crate::load_config::load_config;
use anyhow::{Context, Result};
use clap::Parser;
use ghidra_sync_core::github::GithubClient;
use ghidra_sync_core::synchronise::{synchronise, SyncMode};
use ghidra_sync_core::writer::FsWriter;
use std::path::PathBuf;

/// CLI for ghidra-sync: refresh vendored Ghidra files from upstream.
#[derive(Parser, Debug)]
#[clap(
    name = "ghidra-sync",
    version,
    about = "Update Ghidra decompiler source files and (optionally) processor definition files from GitHub"
)]
pub struct Cli {
    /// Mirror the processor definitions tree instead of the decompiler sources
    #[clap(long)]
    pub cpus: bool,

    /// Authorization token, raises the GitHub request limit
    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Optional YAML config overriding the upstream layout
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Directory relative config paths are resolved against
    #[clap(long, default_value = ".")]
    pub root: PathBuf,
}

impl Cli {
    pub fn mode(&self) -> SyncMode {
        if self.cpus {
            SyncMode::Processors
        } else {
            SyncMode::Decompiler
        }
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    let mode = cli.mode();
    let config = load_config(cli.config.as_deref())?.rooted_at(&cli.root);
    config.trace_loaded();

    let client = GithubClient::new(cli.token.as_deref()).context("Failed to build GitHub client")?;

    tracing::info!(?mode, "Starting synchronisation");
    let report = synchronise(&config, mode, &client, &FsWriter)
        .await
        .with_context(|| format!("Synchronisation failed in {mode:?} mode"))?;

    tracing::info!(?report, "Synchronisation complete");
    println!(
        "Updated {} file(s) from {} listing(s); {} skipped, {} excluded.",
        report.updated.len(),
        report.listings,
        report.skipped,
        report.excluded
    );
    Ok(())
}
