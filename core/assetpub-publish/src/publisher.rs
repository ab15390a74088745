//! The verification-and-publish pipeline.
//!
//! ```text
//! payload ─▶ AssetRequest ─▶ AssetSource::read ─▶ canonicalize ─▶ ContentDigest
//!                                                                    │
//!                    AssetResponse ◀─ gate::apply (maybe StorageSink::write)
//! ```
//!
//! Every step runs in sequence on the calling thread and may abort the
//! request. Nothing is cached between requests.

use std::sync::Arc;

use assetpub_storage::StorageSink;
use tracing::{debug, error};

use crate::canonical::canonicalize;
use crate::digest::ContentDigest;
use crate::error::PublishResult;
use crate::gate::{self, GateDecision};
use crate::request::AssetRequest;
use crate::response::AssetResponse;
use crate::source::AssetSource;

/// Runs the pipeline for an already-normalized request.
pub fn publish(
    request: &AssetRequest,
    assets: &dyn AssetSource,
    sink: &dyn StorageSink,
) -> PublishResult<AssetResponse> {
    let raw = assets.read(&request.asset_type, &request.version)?;
    let asset = canonicalize(&raw)?;
    let digest = ContentDigest::of(&asset);
    debug!(
        "Computed digest {} for {}/{}",
        digest, request.asset_type, request.version
    );

    let decision = gate::apply(request, &digest, &asset, sink)?;
    let published = match decision {
        GateDecision::Published => Some(asset),
        GateDecision::Skipped(_) => None,
    };
    AssetResponse::build(request, &digest, published)
}

/// Holds the injected collaborators and serves publish requests.
#[derive(Clone)]
pub struct AssetPublisher {
    assets: Arc<dyn AssetSource>,
    sink: Arc<dyn StorageSink>,
}

impl AssetPublisher {
    pub fn new(assets: Arc<dyn AssetSource>, sink: Arc<dyn StorageSink>) -> Self {
        Self { assets, sink }
    }

    /// Full request contract: raw payload in, JSON response out.
    pub fn handle(&self, payload: &str) -> PublishResult<String> {
        debug!("File handler invoked with payload: {}", payload);
        let result = AssetRequest::parse(payload)
            .and_then(|request| self.publish(&request))
            .and_then(|response| response.to_json());
        if let Err(e) = &result {
            error!("Publish request failed: {}", e);
        }
        result
    }

    /// Runs the pipeline for an already-normalized request.
    pub fn publish(&self, request: &AssetRequest) -> PublishResult<AssetResponse> {
        publish(request, self.assets.as_ref(), self.sink.as_ref())
    }
}
