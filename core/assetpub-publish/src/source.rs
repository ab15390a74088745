//! Asset lookup.
//!
//! Assets are addressed by `(type, version)` and live at
//! `<root>/<type>/<version>.json`. The root is fixed when the store is
//! constructed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{PublishError, PublishResult};

/// File extension of every asset.
pub const ASSET_EXTENSION: &str = "json";

/// Read-only source of raw asset bytes.
pub trait AssetSource: Send + Sync {
    /// Returns the full, unmodified bytes of the asset.
    ///
    /// Fails with [`PublishError::AssetNotFound`] when no readable asset
    /// exists for `(asset_type, version)`.
    fn read(&self, asset_type: &str, version: &str) -> PublishResult<Vec<u8>>;
}

/// How caller-supplied `type` and `version` strings are treated when they
/// are spliced into a filesystem path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SegmentPolicy {
    /// Each value must be a single plain path segment.
    #[default]
    Strict,
    /// Values are spliced in verbatim, so `..` and separators can escape
    /// the root. Offending requests are logged at warn level.
    Permissive,
}

/// Asset source reading from a directory tree.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
    policy: SegmentPolicy,
}

impl FsAssetStore {
    /// Creates a store rooted at `root` with [`SegmentPolicy::Strict`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: SegmentPolicy::Strict,
        }
    }

    /// Replaces the segment policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SegmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn policy(&self) -> SegmentPolicy {
        self.policy
    }

    /// Builds `<root>/<type>/<version>.json` by plain concatenation, without
    /// any validation.
    pub fn path_for(&self, asset_type: &str, version: &str) -> PathBuf {
        let mut path = OsString::from(self.root.as_os_str());
        path.push("/");
        path.push(asset_type);
        path.push("/");
        path.push(version);
        path.push(".");
        path.push(ASSET_EXTENSION);
        PathBuf::from(path)
    }

    fn check_segments(&self, asset_type: &str, version: &str) -> PublishResult<()> {
        for (field, value) in [("type", asset_type), ("version", version)] {
            if is_plain_segment(value) {
                continue;
            }
            match self.policy {
                SegmentPolicy::Strict => {
                    return Err(PublishError::InvalidInput(format!(
                        "{field} {value:?} is not a plain path segment"
                    )));
                }
                SegmentPolicy::Permissive => {
                    warn!("Asset {field} {value:?} is not a plain path segment; resolving anyway");
                }
            }
        }
        Ok(())
    }
}

impl AssetSource for FsAssetStore {
    fn read(&self, asset_type: &str, version: &str) -> PublishResult<Vec<u8>> {
        self.check_segments(asset_type, version)?;

        let path = self.path_for(asset_type, version);
        let bytes = std::fs::read(&path).map_err(|e| {
            PublishError::AssetNotFound(format!("{}: {e}", path.display()))
        })?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }
}

fn is_plain_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(['/', '\\', '\0'])
}
