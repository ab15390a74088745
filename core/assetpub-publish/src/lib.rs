//! Digest-gated publication of versioned JSON assets.
//!
//! A caller names an asset by `(type, version)`. The publisher reads
//! `<root>/<type>/<version>.json`, reduces it to a whitespace-free
//! canonical form, and hashes that form. The digest is always reported
//! back. The canonical bytes are written to storage, and returned, only
//! when the caller supplied the same digest up front.
//!
//! - [`AssetRequest`]: request parsing and defaults (`"core"`, `"1.0.0"`)
//! - [`AssetSource`] / [`FsAssetStore`]: asset lookup
//! - [`canonicalize`] / [`CanonicalAsset`]: canonical form
//! - [`ContentDigest`]: SHA-256 over canonical bytes
//! - [`gate`]: the proof-of-possession check in front of the sink
//! - [`AssetPublisher`]: the whole pipeline behind one call

mod canonical;
mod digest;
mod error;
pub mod gate;
mod health;
mod publisher;
mod request;
mod response;
mod source;

pub use canonical::{canonicalize, CanonicalAsset};
pub use digest::ContentDigest;
pub use error::{PublishError, PublishResult, RpcCode};
pub use gate::{GateDecision, SkipReason};
pub use health::{health_check, HealthResponse};
pub use publisher::{publish, AssetPublisher};
pub use request::{AssetRequest, DEFAULT_ASSET_TYPE, DEFAULT_ASSET_VERSION};
pub use response::AssetResponse;
pub use source::{AssetSource, FsAssetStore, SegmentPolicy, ASSET_EXTENSION};
