//! Proof-of-possession publish gate.
//!
//! Canonical bytes reach storage only when the caller already knows their
//! digest. A bare lookup (no claim) or a stale claim never writes.

use assetpub_storage::{StorageRecord, StorageSink};
use tracing::{debug, info};

use crate::canonical::CanonicalAsset;
use crate::digest::ContentDigest;
use crate::error::PublishResult;
use crate::request::AssetRequest;

/// Why the gate declined to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The request carried no digest.
    NoClaim,
    /// The claimed digest differs from the computed one.
    Mismatch,
}

/// Outcome of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Published,
    Skipped(SkipReason),
}

impl GateDecision {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Writes `asset` to `sink` under `(asset_type, version)` if the request's
/// claim matches `digest`. At most one write is issued.
pub fn apply(
    request: &AssetRequest,
    digest: &ContentDigest,
    asset: &CanonicalAsset,
    sink: &dyn StorageSink,
) -> PublishResult<GateDecision> {
    if !request.has_claim() {
        debug!("No digest claimed for {}/{}", request.asset_type, request.version);
        return Ok(GateDecision::Skipped(SkipReason::NoClaim));
    }
    if !digest.matches(&request.claimed_digest) {
        debug!(
            "Digest mismatch for {}/{}: claimed {}, computed {}",
            request.asset_type, request.version, request.claimed_digest, digest
        );
        return Ok(GateDecision::Skipped(SkipReason::Mismatch));
    }

    let record = StorageRecord::published(
        request.asset_type.as_str(),
        request.version.as_str(),
        asset.as_bytes(),
    );
    sink.write(&record)?;
    info!(
        "Published {}/{} ({} bytes) to {} storage",
        request.asset_type,
        request.version,
        asset.len(),
        sink.backend_name()
    );
    Ok(GateDecision::Published)
}
