//! Foundation types for Plume.
//!
//! This crate provides the identity, addressing, and temporal types used
//! throughout the Plume post store. Every other Plume crate depends on
//! `plume-types`.
//!
//! # Key Types
//!
//! - [`AuthorId`] — Persistent cryptographic identity of a post owner
//! - [`PostAddress`] — Derived storage address for a (owner, title) pair
//! - [`Post`] — The post record itself, with its size limits
//! - [`Timestamp`] / [`Clock`] — Second-resolution time and its source

pub mod address;
pub mod error;
pub mod identity;
pub mod post;
pub mod temporal;

pub use address::PostAddress;
pub use error::TypeError;
pub use identity::{AuthorId, IdentitySeed};
pub use post::{Post, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
