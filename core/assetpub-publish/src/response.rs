//! Response payload.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::canonical::CanonicalAsset;
use crate::digest::ContentDigest;
use crate::error::{PublishError, PublishResult};
use crate::request::AssetRequest;

/// Reply to a publish request.
///
/// `content` carries the canonical asset as embedded JSON when the gate
/// published, and is `null` otherwise.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssetResponse {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub version: String,
    pub hash: String,
    pub content: Option<Box<RawValue>>,
}

impl AssetResponse {
    /// Assembles the response for `request`. Pass `Some(asset)` only when
    /// the asset was published.
    pub fn build(
        request: &AssetRequest,
        digest: &ContentDigest,
        published: Option<CanonicalAsset>,
    ) -> PublishResult<Self> {
        let content = published
            .map(|asset| RawValue::from_string(asset.into_string()))
            .transpose()
            .map_err(|e| PublishError::Internal(format!("failed to embed content: {e}")))?;

        Ok(Self {
            asset_type: request.asset_type.clone(),
            version: request.version.clone(),
            hash: digest.to_hex(),
            content,
        })
    }

    /// Returns the embedded content, if any.
    pub fn content_bytes(&self) -> Option<&[u8]> {
        self.content.as_deref().map(|raw| raw.get().as_bytes())
    }

    /// Serializes the response to its JSON wire form.
    pub fn to_json(&self) -> PublishResult<String> {
        serde_json::to_string(self)
            .map_err(|e| PublishError::Internal(format!("failed to serialize response: {e}")))
    }
}
