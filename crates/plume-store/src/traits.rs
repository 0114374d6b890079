use plume_types::{AuthorId, Post, PostAddress};

use crate::error::StoreResult;
use crate::rent::Credits;

/// Address-keyed post storage with deposit accounting.
///
/// All implementations must satisfy these invariants:
/// - Every operation is all-or-nothing: on error, nothing was mutated.
/// - Operations on one address are serialized; a reader never observes a
///   partially written record.
/// - `allocate` debits the payer by the rent for the record and reserves it
///   against the slot; `free` refunds the full reservation to the record's
///   owner.
/// - The vault never interprets or validates post fields.
pub trait PostVault: Send + Sync {
    /// Read the record at an address.
    ///
    /// Returns `Ok(None)` if the address is vacant.
    fn read(&self, addr: &PostAddress) -> StoreResult<Option<Post>>;

    /// Allocate a new record at a vacant address, debiting `payer`.
    ///
    /// Fails with `AddressInUse` if the address is occupied and
    /// `InsufficientDeposit` if the payer cannot cover the rent.
    fn allocate(&self, addr: PostAddress, post: Post, payer: &AuthorId) -> StoreResult<()>;

    /// Overwrite the live record at an address in place.
    ///
    /// The reservation is re-priced if the record's serialized size changed;
    /// the delta is settled against the record's owner. Fails with
    /// `VacantAddress` if there is no record.
    fn write(&self, addr: &PostAddress, post: Post) -> StoreResult<()>;

    /// Atomically move the record at `from` to the vacant address `to`.
    ///
    /// The deposit reservation follows the record (re-priced like `write`).
    /// Fails with `VacantAddress` if `from` is vacant and `AddressInUse` if
    /// `to` is occupied; in both cases nothing moves.
    fn relocate(&self, from: &PostAddress, to: PostAddress, post: Post) -> StoreResult<()>;

    /// Free the record at an address, refunding its reserved deposit to the
    /// record's owner. Returns the refunded amount.
    ///
    /// Fails with `VacantAddress` if there is no record. The address is
    /// immediately reusable for a fresh allocation.
    fn free(&self, addr: &PostAddress) -> StoreResult<Credits>;

    /// Snapshot of all live records, in no particular order.
    fn iter_live(&self) -> StoreResult<Vec<(PostAddress, Post)>>;

    /// The payer-facing deposit balance of an account.
    fn balance(&self, owner: &AuthorId) -> StoreResult<Credits>;

    /// Credit an account's deposit balance (test funding, top-ups).
    fn fund(&self, owner: &AuthorId, credits: Credits) -> StoreResult<()>;
}
