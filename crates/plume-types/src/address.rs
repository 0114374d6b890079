use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::identity::AuthorId;

/// Derived storage address of a post record.
///
/// A `PostAddress` is the BLAKE3 hash of a fixed domain tag, the owner's
/// identity, and the title's raw bytes. The derivation is pure: anyone who
/// knows the owner and title recomputes the same address with no lookup
/// table, and distinct (owner, title) pairs map to distinct addresses up to
/// hash collision. The storage backend and the post engine agree on nothing
/// except this function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostAddress([u8; 32]);

impl PostAddress {
    /// Derive the address for a (owner, title) pair.
    pub fn derive(owner: &AuthorId, title: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"plume-post-v1:");
        hasher.update(owner.as_bytes());
        hasher.update(b":");
        hasher.update(title.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from a pre-computed 32-byte hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("pa:{}", hex::encode(&self.0[..4]))
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("pa:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for PostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostAddress({})", self.short_id())
    }
}

impl fmt::Display for PostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}
