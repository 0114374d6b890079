use plume_crypto::SignatureError;
use plume_post::PostError;
use plume_store::StoreError;

/// Errors from SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Envelope verification failed (forged or altered request).
    #[error("signature verification failed: {0}")]
    Signature(#[from] SignatureError),

    /// The signed payload is not a well-formed operation.
    #[error("malformed operation payload: {0}")]
    MalformedOp(String),

    /// The post store rejected the operation.
    #[error(transparent)]
    Post(#[from] PostError),

    /// Backend fault outside the post error taxonomy.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;
