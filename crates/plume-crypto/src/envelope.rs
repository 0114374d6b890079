use std::fmt;

use serde::{Deserialize, Serialize};
use plume_types::identity::IdentitySeed;
use plume_types::AuthorId;

/// Ed25519 keypair held by a post author.
///
/// The only thing an `AuthorKey` can do is seal operations into an
/// [`Envelope`] and name its own [`AuthorId`]; raw signing and the secret
/// bytes stay private to this module. Anyone holding the matching public
/// key recomputes the same `AuthorId`, so ownership checks in the store
/// reduce to identity equality.
pub struct AuthorKey {
    secret: ed25519_dalek::SigningKey,
}

impl AuthorKey {
    /// Generate a new random author key.
    pub fn generate() -> Self {
        let mut csprng = rand::thread_rng();
        Self {
            secret: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Derive a key deterministically from a 32-byte seed (tests,
    /// fixtures, key restore).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            secret: ed25519_dalek::SigningKey::from_bytes(&seed),
        }
    }

    /// The author identity this key controls.
    pub fn author_id(&self) -> AuthorId {
        AuthorId::derive(&IdentitySeed::PublicKey(self.public_bytes()))
    }

    /// The raw public key bytes.
    pub fn public_bytes(&self) -> [u8; 32] {
        self.secret.verifying_key().to_bytes()
    }
}

impl fmt::Debug for AuthorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorKey({}, <secret redacted>)", self.author_id())
    }
}

/// A signed operation envelope.
///
/// Carries an opaque payload, the sender's public key, and an Ed25519
/// signature over the payload. Verification proves the payload was produced
/// by the holder of the key and yields the caller's [`AuthorId`]; the post
/// store then only compares that identity against a record's stored owner.
#[derive(Clone, Serialize, Deserialize)]
pub struct Envelope {
    payload: Vec<u8>,
    public_key: [u8; 32],
    signature: Vec<u8>,
}

impl Envelope {
    /// Sign a payload, producing an envelope.
    pub fn seal(key: &AuthorKey, payload: Vec<u8>) -> Self {
        use ed25519_dalek::Signer;
        let signature = key.secret.sign(&payload).to_bytes().to_vec();
        Self {
            payload,
            public_key: key.public_bytes(),
            signature,
        }
    }

    /// Verify the signature and return the sender's identity.
    ///
    /// Fails if the public key is malformed, the signature is not 64 bytes,
    /// or the signature does not match the payload (forged or altered
    /// envelopes).
    pub fn verify(&self) -> Result<AuthorId, SignatureError> {
        use ed25519_dalek::Verifier;
        let key = ed25519_dalek::VerifyingKey::from_bytes(&self.public_key)
            .map_err(|_| SignatureError::InvalidKey)?;
        let raw: [u8; 64] = self
            .signature
            .as_slice()
            .try_into()
            .map_err(|_| SignatureError::InvalidSignature)?;
        key.verify(&self.payload, &ed25519_dalek::Signature::from_bytes(&raw))
            .map_err(|_| SignatureError::InvalidSignature)?;
        Ok(AuthorId::derive(&IdentitySeed::PublicKey(self.public_key)))
    }

    /// The signed payload bytes. Trust the contents only after [`verify`]
    /// succeeds.
    ///
    /// [`verify`]: Envelope::verify
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Envelope({} payload bytes, signer {})",
            self.payload.len(),
            hex::encode(&self.public_key[..4])
        )
    }
}

/// Errors from envelope verification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid key")]
    InvalidKey,
}
