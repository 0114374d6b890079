use tracing::{debug, warn};
use plume_store::{Credits, PostVault, StoreError};
use plume_types::{AuthorId, Clock, Post, PostAddress};

use crate::error::{PostError, PostResult};
use crate::events::{EventSink, NullSink, PostEvent};
use crate::validation::{validate_content, validate_title};

/// The authoritative post store.
///
/// Owns the mapping from (owner, title) to a live [`Post`] through a
/// [`PostVault`] backend and a [`Clock`]. The store performs every
/// validation and ownership check itself; it trusts the `caller` identity
/// it is handed, which an external verifier (see `plume-crypto`) must have
/// proven.
pub struct PostStore<V: PostVault, C: Clock> {
    vault: V,
    clock: C,
    sink: Box<dyn EventSink>,
}

impl<V: PostVault, C: Clock> PostStore<V, C> {
    /// Create a store that discards lifecycle events.
    pub fn new(vault: V, clock: C) -> Self {
        Self::with_sink(vault, clock, Box::new(NullSink))
    }

    /// Create a store that forwards lifecycle events to `sink`.
    pub fn with_sink(vault: V, clock: C, sink: Box<dyn EventSink>) -> Self {
        Self { vault, clock, sink }
    }

    /// The backing vault (deposit balances, funding).
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Create a new post owned by `caller`.
    ///
    /// The caller pays the record's deposit. Fails with a validation error
    /// before anything is written, or `AlreadyExists` if the derived
    /// address is occupied.
    pub fn create(&self, caller: &AuthorId, title: &str, content: &str) -> PostResult<Post> {
        validate_title(title)?;
        validate_content(content)?;

        let addr = PostAddress::derive(caller, title);
        let now = self.clock.now();
        let post = Post {
            owner: *caller,
            title: title.to_owned(),
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.vault
            .allocate(addr, post.clone(), caller)
            .map_err(|e| match e {
                StoreError::AddressInUse(addr) => PostError::AlreadyExists(addr),
                other => PostError::Store(other),
            })?;

        debug!(%addr, owner = %caller, "post created");
        self.sink.emit(PostEvent::Created {
            address: addr,
            owner: *caller,
            title: post.title.clone(),
            created_at: now,
        });
        Ok(post)
    }

    /// Read the post at (owner, title).
    pub fn get(&self, owner: &AuthorId, title: &str) -> PostResult<Post> {
        let addr = PostAddress::derive(owner, title);
        self.vault
            .read(&addr)?
            .ok_or(PostError::NotInitialized(addr))
    }

    /// Update the post at (owner, title) with new fields.
    ///
    /// Only the stored owner may update. `created_at` never changes;
    /// `updated_at` always advances strictly, even when the clock has not
    /// ticked since the last write. When `new_title` differs from the
    /// stored title, the record atomically relocates to the address derived
    /// from the new title, so future lookups by title keep working.
    pub fn update(
        &self,
        caller: &AuthorId,
        owner: &AuthorId,
        title: &str,
        new_title: &str,
        new_content: &str,
    ) -> PostResult<Post> {
        let addr = PostAddress::derive(owner, title);
        let stored = self
            .vault
            .read(&addr)?
            .ok_or(PostError::NotInitialized(addr))?;
        if stored.owner != *caller {
            warn!(%addr, caller = %caller, "update rejected: not the owner");
            return Err(PostError::Unauthorized {
                caller: *caller,
                owner: stored.owner,
            });
        }
        validate_title(new_title)?;
        validate_content(new_content)?;

        let updated_at = self.clock.now().max(stored.updated_at.next());
        let post = Post {
            owner: stored.owner,
            title: new_title.to_owned(),
            content: new_content.to_owned(),
            created_at: stored.created_at,
            updated_at,
        };

        if new_title == stored.title {
            self.vault.write(&addr, post.clone())?;
        } else {
            let new_addr = PostAddress::derive(&stored.owner, new_title);
            self.vault
                .relocate(&addr, new_addr, post.clone())
                .map_err(|e| match e {
                    StoreError::AddressInUse(addr) => PostError::AlreadyExists(addr),
                    other => PostError::Store(other),
                })?;
            debug!(%addr, %new_addr, "post relocated on title change");
        }

        debug!(addr = %post.address(), owner = %caller, "post updated");
        self.sink.emit(PostEvent::Updated {
            address: post.address(),
            owner: stored.owner,
            title: post.title.clone(),
            updated_at,
        });
        Ok(post)
    }

    /// Delete the post at (owner, title), refunding its reserved deposit to
    /// the owner. Returns the refunded amount.
    ///
    /// Only the stored owner may delete. The key becomes immediately
    /// available for a fresh creation; there is no resurrection.
    pub fn delete(&self, caller: &AuthorId, owner: &AuthorId, title: &str) -> PostResult<Credits> {
        let addr = PostAddress::derive(owner, title);
        let stored = self
            .vault
            .read(&addr)?
            .ok_or(PostError::NotInitialized(addr))?;
        if stored.owner != *caller {
            warn!(%addr, caller = %caller, "delete rejected: not the owner");
            return Err(PostError::Unauthorized {
                caller: *caller,
                owner: stored.owner,
            });
        }

        let refund = self.vault.free(&addr).map_err(|e| match e {
            StoreError::VacantAddress(addr) => PostError::NotInitialized(addr),
            other => PostError::Store(other),
        })?;

        debug!(%addr, %refund, "post deleted");
        self.sink.emit(PostEvent::Deleted {
            address: addr,
            owner: stored.owner,
            refund,
        });
        Ok(refund)
    }

    /// Iterate over all live posts, optionally filtered by owner.
    ///
    /// The iterator is finite and restartable (call `list` again); it
    /// reflects a snapshot taken when the call began and makes no ordering
    /// guarantee. Callers wanting recency order sort by `created_at`.
    pub fn list(&self, filter: Option<&AuthorId>) -> PostResult<impl Iterator<Item = Post>> {
        let filter = filter.copied();
        let live = self.vault.iter_live()?;
        Ok(live
            .into_iter()
            .map(|(_, post)| post)
            .filter(move |post| filter.map_or(true, |owner| post.owner == owner)))
    }
}

impl<V: PostVault, C: Clock> std::fmt::Debug for PostStore<V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostStore").finish_non_exhaustive()
    }
}
