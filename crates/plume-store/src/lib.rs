//! Storage backend boundary for Plume.
//!
//! This crate defines the [`PostVault`] trait — the narrow interface the
//! post engine uses to allocate, read, overwrite, relocate, and free post
//! records keyed by their derived [`PostAddress`](plume_types::PostAddress)
//! — together with the deposit (rent) accounting that backs allocation.
//!
//! # Design Rules
//!
//! 1. Every vault operation is all-or-nothing: it either commits the full
//!    transition or leaves the vault untouched and returns an error.
//! 2. Operations on a single address are serialized by the backend;
//!    operations on distinct addresses are independent.
//! 3. Allocating a record debits the payer by the rent for the record's
//!    serialized size; freeing it refunds the reserved deposit in full.
//! 4. The vault never validates post fields — that is the engine's job.
//!
//! # Backends
//!
//! - [`InMemoryPostVault`] — `RwLock<HashMap>`-based vault for tests and
//!   embedding.

pub mod error;
pub mod memory;
pub mod rent;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryPostVault;
pub use rent::{Credits, RentSchedule};
pub use traits::PostVault;
