use plume_types::PostAddress;

use crate::rent::Credits;

/// Errors from vault operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// Allocation or relocation targeted an address that is already live.
    #[error("address already in use: {0}")]
    AddressInUse(PostAddress),

    /// The operation targeted an address with no live record.
    #[error("no record at address: {0}")]
    VacantAddress(PostAddress),

    /// The payer's balance cannot cover the required deposit.
    #[error("insufficient deposit: required {required}, available {available}")]
    InsufficientDeposit {
        required: Credits,
        available: Credits,
    },

    /// Credit arithmetic overflowed.
    #[error("deposit arithmetic overflow")]
    DepositOverflow,

    /// Record serialization failure (rent sizing or persistence).
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for vault operations.
pub type StoreResult<T> = Result<T, StoreError>;
