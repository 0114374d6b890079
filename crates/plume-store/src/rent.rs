use std::fmt;

use serde::{Deserialize, Serialize};
use plume_types::Post;

use crate::error::{StoreError, StoreResult};

/// Deposit currency unit.
///
/// All arithmetic is checked: overflow surfaces as
/// [`StoreError::DepositOverflow`], never a silent wrap.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Credits(u64);

impl Credits {
    pub const ZERO: Self = Self(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(&self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Self) -> StoreResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(StoreError::DepositOverflow)
    }

    pub fn checked_sub(self, other: Self) -> StoreResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(StoreError::DepositOverflow)
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn checked_mul(self, factor: u64) -> StoreResult<Self> {
        self.0
            .checked_mul(factor)
            .map(Self)
            .ok_or(StoreError::DepositOverflow)
    }
}

impl fmt::Debug for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credits({})", self.0)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rent pricing for record allocation.
///
/// The deposit reserved for a record is `base + per_byte * serialized_len`.
/// The vault applies whatever schedule it is configured with; it never
/// invents fee amounts on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentSchedule {
    /// Flat cost per record.
    pub base: Credits,
    /// Cost per serialized byte.
    pub per_byte: Credits,
}

impl RentSchedule {
    /// Default pricing used by the in-memory vault.
    pub const DEFAULT: Self = Self {
        base: Credits::new(128),
        per_byte: Credits::new(4),
    };

    /// A schedule that charges nothing (tests that ignore deposits).
    pub const FREE: Self = Self {
        base: Credits::ZERO,
        per_byte: Credits::ZERO,
    };

    /// The deposit required to hold the given record.
    pub fn rent_for(&self, post: &Post) -> StoreResult<Credits> {
        let bytes = bincode::serialized_size(post)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.base.checked_add(self.per_byte.checked_mul(bytes)?)
    }
}

impl Default for RentSchedule {
    fn default() -> Self {
        Self::DEFAULT
    }
}
