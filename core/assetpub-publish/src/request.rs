//! Request parsing and defaulting.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PublishError, PublishResult};

/// Asset type used when the request omits one.
pub const DEFAULT_ASSET_TYPE: &str = "core";

/// Asset version used when the request omits one.
pub const DEFAULT_ASSET_VERSION: &str = "1.0.0";

/// Wire shape of the request. Every field is optional and `null` counts
/// as absent.
#[derive(Debug, Default, Deserialize)]
struct RawRequest {
    #[serde(rename = "type")]
    asset_type: Option<String>,
    version: Option<String>,
    hash: Option<String>,
}

/// A normalized publish request.
///
/// `asset_type` and `version` are never empty. An empty `claimed_digest`
/// means the caller makes no claim and nothing will be published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRequest {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub version: String,
    #[serde(rename = "hash")]
    pub claimed_digest: String,
}

impl AssetRequest {
    /// Builds a request, substituting defaults for an empty type or version.
    pub fn new(
        asset_type: impl Into<String>,
        version: impl Into<String>,
        claimed_digest: impl Into<String>,
    ) -> Self {
        Self {
            asset_type: non_empty_or(asset_type.into(), DEFAULT_ASSET_TYPE),
            version: non_empty_or(version.into(), DEFAULT_ASSET_VERSION),
            claimed_digest: claimed_digest.into(),
        }
    }

    /// Parses and normalizes a raw request payload.
    ///
    /// Empty payloads are rejected before any parsing is attempted.
    pub fn parse(payload: &str) -> PublishResult<Self> {
        if payload.is_empty() {
            return Err(PublishError::InvalidInput("payload is empty".to_string()));
        }

        let value: Value = serde_json::from_str(payload)
            .map_err(|e| PublishError::InvalidInput(format!("malformed payload: {e}")))?;
        let raw: RawRequest = match value {
            Value::Null => RawRequest::default(),
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| PublishError::InvalidInput(format!("malformed payload: {e}")))?,
            other => {
                return Err(PublishError::InvalidInput(format!(
                    "payload must be an object, got {}",
                    json_kind(&other)
                )));
            }
        };

        Ok(Self::new(
            raw.asset_type.unwrap_or_default(),
            raw.version.unwrap_or_default(),
            raw.hash.unwrap_or_default(),
        ))
    }

    /// Whether the caller supplied a digest to check.
    pub fn has_claim(&self) -> bool {
        !self.claimed_digest.is_empty()
    }
}

impl Default for AssetRequest {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
