//! High-level SDK for Plume.
//!
//! Provides [`Blog`], an embeddable post store that wires together an
//! in-memory vault, a clock, and signed-envelope verification. This is the
//! main entry point for applications embedding Plume.

pub mod blog;
pub mod error;
pub mod ops;

pub use blog::{Blog, Outcome};
pub use error::{SdkError, SdkResult};
pub use ops::PostOp;

// Re-export key types
pub use plume_crypto::{AuthorKey, Envelope};
pub use plume_post::{PostError, PostEvent};
pub use plume_store::{Credits, RentSchedule};
pub use plume_types::{AuthorId, Post, PostAddress, Timestamp};
