//! Shared fixtures for publish tests.

#![allow(dead_code)]

use assetpub_publish::{AssetPublisher, FsAssetStore};
use assetpub_storage::{MemorySink, StorageError, StorageRecord, StorageResult, StorageSink};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// The example asset as it sits on disk, pretty-printed.
pub const EXAMPLE_PRETTY: &str = "{\n    \"example_data\": \"My data\",\n    \"number\": 1234567890\n}\n";

/// Canonical form of [`EXAMPLE_PRETTY`].
pub const EXAMPLE_CANONICAL: &str = r#"{"example_data":"My data","number":1234567890}"#;

/// SHA-256 of [`EXAMPLE_CANONICAL`].
pub const EXAMPLE_DIGEST: &str = "18a88709a7318abec3a84dd99eca5cb4a69f0e77b27a59547c821dd05e94fa99";

/// Writes `content` to `<root>/<asset_type>/<version>.json`.
pub fn write_asset(root: &Path, asset_type: &str, version: &str, content: &str) {
    let dir = root.join(asset_type);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{version}.json")), content).unwrap();
}

/// A temp asset root holding the example at `core/1.0.0.json`, a memory
/// sink, and a publisher wired to both.
pub struct Fixture {
    pub dir: TempDir,
    pub sink: Arc<MemorySink>,
    pub publisher: AssetPublisher,
}

impl Fixture {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn writes(&self) -> usize {
        self.sink.write_count().unwrap()
    }
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    write_asset(dir.path(), "core", "1.0.0", EXAMPLE_PRETTY);
    let sink = Arc::new(MemorySink::new());
    let publisher = AssetPublisher::new(
        Arc::new(FsAssetStore::new(dir.path())),
        Arc::clone(&sink) as Arc<dyn StorageSink>,
    );
    Fixture { dir, sink, publisher }
}

/// Sink whose every write fails.
pub struct FailingSink;

impl StorageSink for FailingSink {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    fn write(&self, _record: &StorageRecord) -> StorageResult<()> {
        Err(StorageError::Storage("sink offline".to_string()))
    }
}
