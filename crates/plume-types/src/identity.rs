use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Material used to derive an [`AuthorId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentitySeed {
    /// Genesis from a raw 32-byte value (tests, fixtures).
    Genesis([u8; 32]),
    /// An ed25519 public key (32 bytes). The normal production path.
    PublicKey([u8; 32]),
}

/// Persistent cryptographic identity of a post owner.
///
/// An `AuthorId` is derived deterministically from [`IdentitySeed`] using
/// BLAKE3. The same seed always produces the same identity, so any holder of
/// an author's public key can recompute their `AuthorId` without a registry.
/// The store never authenticates authors itself; it compares `AuthorId`
/// values handed to it by an external verifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuthorId {
    hash: [u8; 32],
}

impl AuthorId {
    /// Derive an `AuthorId` from identity seed material.
    pub fn derive(seed: &IdentitySeed) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"plume-author-v1:");
        match seed {
            IdentitySeed::Genesis(bytes) => {
                hasher.update(b"genesis:");
                hasher.update(bytes);
            }
            IdentitySeed::PublicKey(pk) => {
                hasher.update(b"pubkey:");
                hasher.update(pk);
            }
        }
        Self {
            hash: *hasher.finalize().as_bytes(),
        }
    }

    /// Create an ephemeral (random) AuthorId for tests and demos.
    pub fn ephemeral() -> Self {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        Self::derive(&IdentitySeed::Genesis(bytes))
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("au:{}", hex::encode(&self.hash[..4]))
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("au:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { hash: arr })
    }

    /// Create from a raw 32-byte hash. Use `derive()` for production code.
    pub fn from_raw(hash: [u8; 32]) -> Self {
        Self { hash }
    }
}

impl fmt::Debug for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorId({})", self.short_id())
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derive_is_deterministic() {
        let seed = IdentitySeed::PublicKey([42u8; 32]);
        let id1 = AuthorId::derive(&seed);
        let id2 = AuthorId::derive(&seed);
        assert_eq!(id1, id2);
    }

    #[test]
    fn different_seeds_produce_different_ids() {
        let id1 = AuthorId::derive(&IdentitySeed::Genesis([1; 32]));
        let id2 = AuthorId::derive(&IdentitySeed::Genesis([2; 32]));
        assert_ne!(id1, id2);
    }

    #[test]
    fn seed_variants_are_domain_separated() {
        let bytes = [7u8; 32];
        let genesis = AuthorId::derive(&IdentitySeed::Genesis(bytes));
        let pubkey = AuthorId::derive(&IdentitySeed::PublicKey(bytes));
        assert_ne!(genesis, pubkey);
    }

    #[test]
    fn ephemeral_ids_are_unique() {
        let id1 = AuthorId::ephemeral();
        let id2 = AuthorId::ephemeral();
        assert_ne!(id1, id2);
    }

    #[test]
    fn short_id_format() {
        let id = AuthorId::derive(&IdentitySeed::Genesis([0; 32]));
        let short = id.short_id();
        assert!(short.starts_with("au:"));
        assert_eq!(short.len(), 11); // "au:" + 8 hex chars
    }

    #[test]
    fn hex_roundtrip() {
        let id = AuthorId::derive(&IdentitySeed::Genesis([99; 32]));
        let parsed = AuthorId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn hex_roundtrip_with_prefix() {
        let id = AuthorId::derive(&IdentitySeed::Genesis([99; 32]));
        let prefixed = format!("au:{}", id.to_hex());
        let parsed = AuthorId::from_hex(&prefixed).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = AuthorId::from_hex("abcd").unwrap_err();
        assert!(matches!(err, TypeError::InvalidLength { .. }));
    }

    #[test]
    fn serde_roundtrip() {
        let id = AuthorId::derive(&IdentitySeed::PublicKey([10; 32]));
        let json = serde_json::to_string(&id).unwrap();
        let parsed: AuthorId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    proptest! {
        #[test]
        fn hex_roundtrip_for_any_id(bytes in any::<[u8; 32]>()) {
            let id = AuthorId::from_raw(bytes);
            prop_assert_eq!(AuthorId::from_hex(&id.to_hex()).unwrap(), id);
        }
    }
}
