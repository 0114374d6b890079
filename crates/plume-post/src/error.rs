use plume_store::StoreError;
use plume_types::{AuthorId, PostAddress, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};

/// Errors from post store operations.
///
/// Four categories, all terminal and non-retryable: validation (the first
/// four kinds, caller-fixable, raised before any mutation), conflict
/// (`AlreadyExists`), authorization (`Unauthorized`), and absence
/// (`NotInitialized`). Backend faults pass through as `Store`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PostError {
    #[error("title cannot be empty")]
    TitleEmpty,

    #[error("title is too long: {chars} chars (max {TITLE_MAX_CHARS})")]
    TitleTooLong { chars: usize },

    #[error("content cannot be empty")]
    ContentEmpty,

    #[error("content is too long: {chars} chars (max {CONTENT_MAX_CHARS})")]
    ContentTooLong { chars: usize },

    #[error("a post already exists at {0}")]
    AlreadyExists(PostAddress),

    #[error("no post exists at {0}")]
    NotInitialized(PostAddress),

    #[error("caller {caller} is not the post owner {owner}")]
    Unauthorized { caller: AuthorId, owner: AuthorId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for post store operations.
pub type PostResult<T> = Result<T, PostError>;
