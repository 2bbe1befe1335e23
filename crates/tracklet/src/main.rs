//! Tracklet CLI binary.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracklet::cli::Cli;

/// Main entry point for the tracklet CLI.
///
/// Uses tokio's current_thread runtime; commands run one store operation
/// after another and never in parallel.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=tracklet=debug,tracklet_kv=trace cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tracklet=info,tracklet_kv=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting tracklet CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Tracklet CLI completed successfully");
    Ok(())
}
