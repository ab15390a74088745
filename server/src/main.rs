//! assetpub HTTP host
//!
//! Serves the digest-gated file handler and a health probe:
//! 1. `POST /v1/rpc/fileHandler` verifies a caller's digest and publishes
//!    the canonical asset to storage on a match
//! 2. `GET /v1/rpc/healthCheck` answers `{"health":"OK"}`
//!
//! Usage:
//!   assetpub-server --port 7350 --asset-root /srv/json_files --storage assets.db

use anyhow::{Context, Result};
use assetpub_server::build_router;
use assetpub_server::config::Args;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("assetpub server starting...");
    if !args.asset_root.is_dir() {
        warn!(
            "Asset root {} is not a directory; every lookup will miss",
            args.asset_root.display()
        );
    }
    if args.permissive_paths {
        warn!("Permissive asset paths enabled; type/version may escape the asset root");
    }

    let publisher = args
        .build_publisher()
        .with_context(|| format!("Failed to open storage at {}", args.storage))?;
    let app = build_router(publisher);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", args.port))?;
    info!(
        "Serving assets from {} on port {} (storage: {})",
        args.asset_root.display(),
        args.port,
        args.storage
    );

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
