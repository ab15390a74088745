//! Startup configuration.

use std::path::PathBuf;
use std::sync::Arc;

use assetpub_publish::{AssetPublisher, FsAssetStore, SegmentPolicy};
use assetpub_storage::{SqliteSink, StorageResult, StorageSink};
use clap::Parser;

/// Storage path that selects an in-memory SQLite database.
pub const IN_MEMORY_STORAGE: &str = ":memory:";

#[derive(Parser, Debug, Clone)]
#[command(name = "assetpub-server")]
#[command(about = "Digest-gated JSON asset publisher")]
pub struct Args {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "7350")]
    pub port: u16,

    /// Root directory holding `<type>/<version>.json` assets
    #[arg(long, default_value = "data/json_files")]
    pub asset_root: PathBuf,

    /// SQLite database for published assets (`:memory:` for in-memory)
    #[arg(long, default_value = "assetpub.db")]
    pub storage: String,

    /// Splice type/version into asset paths without segment validation
    #[arg(long)]
    pub permissive_paths: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn segment_policy(&self) -> SegmentPolicy {
        if self.permissive_paths {
            SegmentPolicy::Permissive
        } else {
            SegmentPolicy::Strict
        }
    }

    /// Opens the configured sink.
    pub fn open_sink(&self) -> StorageResult<SqliteSink> {
        if self.storage == IN_MEMORY_STORAGE {
            SqliteSink::open_in_memory()
        } else {
            SqliteSink::open(&self.storage)
        }
    }

    /// Wires the asset store and sink into a publisher. The asset root is
    /// fixed from here on.
    pub fn build_publisher(&self) -> StorageResult<AssetPublisher> {
        let assets = FsAssetStore::new(&self.asset_root).with_policy(self.segment_policy());
        let sink: Arc<dyn StorageSink> = Arc::new(self.open_sink()?);
        Ok(AssetPublisher::new(Arc::new(assets), sink))
    }
}
