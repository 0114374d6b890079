use serde::{Deserialize, Serialize};

use crate::address::PostAddress;
use crate::identity::AuthorId;
use crate::temporal::Timestamp;

/// Maximum title length, in Unicode scalar values.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum content length, in Unicode scalar values.
pub const CONTENT_MAX_CHARS: usize = 1000;

/// A stored post record.
///
/// Exactly one live `Post` exists per (owner, title) pair; the pair derives
/// the record's [`PostAddress`]. Field invariants, enforced by the post
/// engine before any write:
///
/// - `owner` never changes after creation
/// - `1 <= title.chars <= TITLE_MAX_CHARS`
/// - `1 <= content.chars <= CONTENT_MAX_CHARS`
/// - `created_at <= updated_at`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Identity authorized to mutate and delete this post.
    pub owner: AuthorId,
    /// Post title, part of the record's storage key.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Set once at creation, never modified.
    pub created_at: Timestamp,
    /// Equal to `created_at` at creation, advanced on every update.
    pub updated_at: Timestamp,
}

impl Post {
    /// The storage address this post currently lives at.
    pub fn address(&self) -> PostAddress {
        PostAddress::derive(&self.owner, &self.title)
    }

    /// Title length in Unicode scalar values.
    pub fn title_chars(&self) -> usize {
        self.title.chars().count()
    }

    /// Content length in Unicode scalar values.
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}
