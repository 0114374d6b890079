use tracing::debug;
use plume_crypto::Envelope;
use plume_post::{PostStore, PostResult};
use plume_store::{Credits, InMemoryPostVault, PostVault, RentSchedule};
use plume_types::{AuthorId, Clock, Post, SystemClock};

use crate::error::SdkResult;
use crate::ops::PostOp;

/// Result of a submitted operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Created(Post),
    Updated(Post),
    Deleted { refund: Credits },
}

/// High-level embeddable post store.
///
/// Wires an [`InMemoryPostVault`] and a clock into a [`PostStore`] and adds
/// the signed-request front door: [`Blog::submit`] verifies an envelope,
/// decodes the operation, and dispatches it as the proven caller. Embedders
/// that authenticate elsewhere can use the direct passthroughs instead.
pub struct Blog<C: Clock = SystemClock> {
    store: PostStore<InMemoryPostVault, C>,
}

impl Blog<SystemClock> {
    /// In-memory blog on the wall clock with default rent pricing.
    pub fn in_memory() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl<C: Clock> Blog<C> {
    /// In-memory blog on a caller-supplied clock.
    pub fn with_clock(clock: C) -> Self {
        Self::with_vault(InMemoryPostVault::new(), clock)
    }

    /// In-memory blog with a specific rent schedule.
    pub fn with_rent(rent: RentSchedule, clock: C) -> Self {
        Self::with_vault(InMemoryPostVault::with_rent(rent), clock)
    }

    fn with_vault(vault: InMemoryPostVault, clock: C) -> Self {
        Self {
            store: PostStore::new(vault, clock),
        }
    }

    /// Credit an author's deposit balance.
    pub fn fund(&self, owner: &AuthorId, credits: Credits) -> SdkResult<()> {
        self.store.vault().fund(owner, credits)?;
        Ok(())
    }

    /// An author's current deposit balance.
    pub fn balance(&self, owner: &AuthorId) -> SdkResult<Credits> {
        Ok(self.store.vault().balance(owner)?)
    }

    /// Verify a signed envelope and execute the operation it carries.
    ///
    /// The caller identity is taken from the envelope signature, never from
    /// the payload. Verification and decoding failures reject the request
    /// before the store is touched.
    pub fn submit(&self, envelope: &Envelope) -> SdkResult<Outcome> {
        let caller = envelope.verify()?;
        let op = PostOp::decode(envelope.payload())?;
        debug!(caller = %caller, ?op, "submitting signed operation");
        match op {
            PostOp::Create { title, content } => {
                let post = self.store.create(&caller, &title, &content)?;
                Ok(Outcome::Created(post))
            }
            PostOp::Update {
                owner,
                title,
                new_title,
                new_content,
            } => {
                let post = self
                    .store
                    .update(&caller, &owner, &title, &new_title, &new_content)?;
                Ok(Outcome::Updated(post))
            }
            PostOp::Delete { owner, title } => {
                let refund = self.store.delete(&caller, &owner, &title)?;
                Ok(Outcome::Deleted { refund })
            }
        }
    }

    // ---- Direct passthroughs (caller already authenticated) ----

    pub fn create(&self, caller: &AuthorId, title: &str, content: &str) -> PostResult<Post> {
        self.store.create(caller, title, content)
    }

    pub fn get(&self, owner: &AuthorId, title: &str) -> PostResult<Post> {
        self.store.get(owner, title)
    }

    pub fn update(
        &self,
        caller: &AuthorId,
        owner: &AuthorId,
        title: &str,
        new_title: &str,
        new_content: &str,
    ) -> PostResult<Post> {
        self.store.update(caller, owner, title, new_title, new_content)
    }

    pub fn delete(&self, caller: &AuthorId, owner: &AuthorId, title: &str) -> PostResult<Credits> {
        self.store.delete(caller, owner, title)
    }

    /// All live posts, optionally filtered by owner, in no defined order.
    pub fn list(&self, filter: Option<&AuthorId>) -> PostResult<Vec<Post>> {
        Ok(self.store.list(filter)?.collect())
    }

    /// Live posts newest-first, the usual presentation order.
    pub fn latest(&self, filter: Option<&AuthorId>) -> PostResult<Vec<Post>> {
        let mut posts = self.list(filter)?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

impl<C: Clock> std::fmt::Debug for Blog<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blog").finish_non_exhaustive()
    }
}
