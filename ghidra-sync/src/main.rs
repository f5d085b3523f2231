use anyhow::Result;
use clap::Parser;
use ghidra_sync::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // GITHUB_TOKEN may come from a .env next to the vendored tree
    dotenv::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    tracing::info!(
        mode = ?cli.mode(),
        root = %cli.root.display(),
        config = ?cli.config,
        token_set = cli.token.is_some(),
        "ghidra-sync starting"
    );
    let result = run(cli).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "ghidra-sync failed, files written so far are kept");
    }
    result
}
