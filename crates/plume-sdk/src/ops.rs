use serde::{Deserialize, Serialize};
use plume_crypto::{AuthorKey, Envelope};
use plume_types::AuthorId;

use crate::error::{SdkError, SdkResult};

/// A post store operation, as carried inside a signed [`Envelope`].
///
/// The envelope signer is the caller; `owner`/`title` in `Update` and
/// `Delete` name the record key, which the engine checks against the
/// caller's identity. Payloads are JSON so they stay inspectable on the
/// wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostOp {
    Create {
        title: String,
        content: String,
    },
    Update {
        owner: AuthorId,
        title: String,
        new_title: String,
        new_content: String,
    },
    Delete {
        owner: AuthorId,
        title: String,
    },
}

impl PostOp {
    /// Serialize and sign this operation into an envelope.
    pub fn seal(&self, key: &AuthorKey) -> SdkResult<Envelope> {
        let payload =
            serde_json::to_vec(self).map_err(|e| SdkError::MalformedOp(e.to_string()))?;
        Ok(Envelope::seal(key, payload))
    }

    /// Decode an operation from verified payload bytes.
    pub fn decode(payload: &[u8]) -> SdkResult<Self> {
        serde_json::from_slice(payload).map_err(|e| SdkError::MalformedOp(e.to_string()))
    }
}
