use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;
use plume_types::{AuthorId, Post, PostAddress};

use crate::error::{StoreError, StoreResult};
use crate::rent::{Credits, RentSchedule};
use crate::traits::PostVault;

struct Slot {
    post: Post,
    deposit: Credits,
}

struct VaultState {
    slots: HashMap<PostAddress, Slot>,
    balances: HashMap<AuthorId, Credits>,
}

/// In-memory, HashMap-based post vault.
///
/// Intended for tests and embedding. Records and balances live behind a
/// single `RwLock`, which gives every operation the all-or-nothing and
/// per-address serialization guarantees of [`PostVault`] for free.
pub struct InMemoryPostVault {
    state: RwLock<VaultState>,
    rent: RentSchedule,
}

impl InMemoryPostVault {
    /// Create an empty vault with the default rent schedule.
    pub fn new() -> Self {
        Self::with_rent(RentSchedule::DEFAULT)
    }

    /// Create an empty vault with a specific rent schedule.
    pub fn with_rent(rent: RentSchedule) -> Self {
        Self {
            state: RwLock::new(VaultState {
                slots: HashMap::new(),
                balances: HashMap::new(),
            }),
            rent,
        }
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.state.read().expect("lock poisoned").slots.len()
    }

    /// Returns `true` if no records are live.
    pub fn is_empty(&self) -> bool {
        self.state.read().expect("lock poisoned").slots.is_empty()
    }

    /// The rent schedule this vault charges.
    pub fn rent_schedule(&self) -> RentSchedule {
        self.rent
    }

    /// Total credits currently reserved against live records, saturating
    /// at the maximum rather than wrapping or resetting.
    pub fn total_reserved(&self) -> Credits {
        let state = self.state.read().expect("lock poisoned");
        state
            .slots
            .values()
            .fold(Credits::ZERO, |acc, slot| acc.saturating_add(slot.deposit))
    }
}

impl Default for InMemoryPostVault {
    fn default() -> Self {
        Self::new()
    }
}

fn balance_of(state: &VaultState, owner: &AuthorId) -> Credits {
    state.balances.get(owner).copied().unwrap_or(Credits::ZERO)
}

/// Settle a reservation change against an owner's balance. Checks funds
/// before touching anything so callers stay all-or-nothing.
fn reprice(
    state: &mut VaultState,
    owner: &AuthorId,
    old_deposit: Credits,
    new_deposit: Credits,
) -> StoreResult<()> {
    let balance = balance_of(state, owner);
    let settled = if new_deposit > old_deposit {
        let delta = new_deposit.checked_sub(old_deposit)?;
        if balance < delta {
            return Err(StoreError::InsufficientDeposit {
                required: delta,
                available: balance,
            });
        }
        balance.checked_sub(delta)?
    } else {
        balance.checked_add(old_deposit.checked_sub(new_deposit)?)?
    };
    state.balances.insert(*owner, settled);
    Ok(())
}

impl PostVault for InMemoryPostVault {
    fn read(&self, addr: &PostAddress) -> StoreResult<Option<Post>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.slots.get(addr).map(|slot| slot.post.clone()))
    }

    fn allocate(&self, addr: PostAddress, post: Post, payer: &AuthorId) -> StoreResult<()> {
        let rent = self.rent.rent_for(&post)?;
        let mut state = self.state.write().expect("lock poisoned");
        if state.slots.contains_key(&addr) {
            return Err(StoreError::AddressInUse(addr));
        }
        let balance = balance_of(&state, payer);
        if balance < rent {
            return Err(StoreError::InsufficientDeposit {
                required: rent,
                available: balance,
            });
        }
        let remaining = balance.checked_sub(rent)?;
        state.balances.insert(*payer, remaining);
        state.slots.insert(addr, Slot { post, deposit: rent });
        debug!(%addr, %rent, "allocated record");
        Ok(())
    }

    fn write(&self, addr: &PostAddress, post: Post) -> StoreResult<()> {
        let new_deposit = self.rent.rent_for(&post)?;
        let mut state = self.state.write().expect("lock poisoned");
        let (owner, old_deposit) = match state.slots.get(addr) {
            Some(slot) => (slot.post.owner, slot.deposit),
            None => return Err(StoreError::VacantAddress(*addr)),
        };
        reprice(&mut state, &owner, old_deposit, new_deposit)?;
        state.slots.insert(
            *addr,
            Slot {
                post,
                deposit: new_deposit,
            },
        );
        Ok(())
    }

    fn relocate(&self, from: &PostAddress, to: PostAddress, post: Post) -> StoreResult<()> {
        let new_deposit = self.rent.rent_for(&post)?;
        let mut state = self.state.write().expect("lock poisoned");
        let (owner, old_deposit) = match state.slots.get(from) {
            Some(slot) => (slot.post.owner, slot.deposit),
            None => return Err(StoreError::VacantAddress(*from)),
        };
        if state.slots.contains_key(&to) {
            return Err(StoreError::AddressInUse(to));
        }
        reprice(&mut state, &owner, old_deposit, new_deposit)?;
        state.slots.remove(from);
        state.slots.insert(
            to,
            Slot {
                post,
                deposit: new_deposit,
            },
        );
        debug!(%from, %to, "relocated record");
        Ok(())
    }

    fn free(&self, addr: &PostAddress) -> StoreResult<Credits> {
        let mut state = self.state.write().expect("lock poisoned");
        let (owner, deposit) = match state.slots.get(addr) {
            Some(slot) => (slot.post.owner, slot.deposit),
            None => return Err(StoreError::VacantAddress(*addr)),
        };
        // Settle the refund before removing the slot: if the credit fails,
        // the record must survive untouched.
        let refunded = balance_of(&state, &owner).checked_add(deposit)?;
        state.slots.remove(addr);
        state.balances.insert(owner, refunded);
        debug!(%addr, refund = %deposit, "freed record");
        Ok(deposit)
    }

    fn iter_live(&self) -> StoreResult<Vec<(PostAddress, Post)>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state
            .slots
            .iter()
            .map(|(addr, slot)| (*addr, slot.post.clone()))
            .collect())
    }

    fn balance(&self, owner: &AuthorId) -> StoreResult<Credits> {
        let state = self.state.read().expect("lock poisoned");
        Ok(balance_of(&state, owner))
    }

    fn fund(&self, owner: &AuthorId, credits: Credits) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        let funded = balance_of(&state, owner).checked_add(credits)?;
        state.balances.insert(*owner, funded);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryPostVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPostVault")
            .field("record_count", &self.len())
            .field("rent", &self.rent)
            .finish()
    }
}
