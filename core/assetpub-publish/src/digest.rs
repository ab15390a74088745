//! Content digest over canonical asset bytes.

use sha2::{Digest, Sha256};
use std::fmt;

use crate::canonical::CanonicalAsset;

/// SHA-256 digest of an asset's canonical bytes.
///
/// Rendered on the wire as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Length of the hex rendering.
    pub const HEX_LEN: usize = 64;

    /// Hashes arbitrary bytes.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Hashes a canonical asset.
    pub fn of(asset: &CanonicalAsset) -> Self {
        Self::compute(asset.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Exact, case-sensitive comparison against a caller's claim.
    /// An empty claim never matches.
    pub fn matches(&self, claim: &str) -> bool {
        !claim.is_empty() && claim == self.to_hex()
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
