//! Whitespace-insensitive canonical form for JSON assets.
//!
//! Canonicalization removes every space, tab, carriage return and line feed
//! that sits between tokens. Everything else (key order, number spelling,
//! string escapes) is kept byte for byte, so two files that differ only in
//! layout share a canonical form.

use serde::de::IgnoredAny;
use std::fmt;

use crate::error::{PublishError, PublishResult};

/// Canonical bytes of one asset. Always valid UTF-8 JSON without
/// insignificant whitespace.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CanonicalAsset(String);

impl CanonicalAsset {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for CanonicalAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalAsset({} bytes)", self.0.len())
    }
}

impl fmt::Display for CanonicalAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for CanonicalAsset {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Reduces raw asset bytes to canonical form.
///
/// Fails with [`PublishError::AssetCorrupt`] unless `raw` is exactly one
/// well-formed UTF-8 JSON value, optionally surrounded by whitespace.
pub fn canonicalize(raw: &[u8]) -> PublishResult<CanonicalAsset> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| PublishError::AssetCorrupt(format!("asset is not UTF-8: {e}")))?;
    serde_json::from_str::<IgnoredAny>(text)
        .map_err(|e| PublishError::AssetCorrupt(format!("asset is not valid JSON: {e}")))?;

    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for ch in text.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            ' ' | '\t' | '\n' | '\r' => {}
            '"' => {
                in_string = true;
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    Ok(CanonicalAsset(out))
}
