//! Core post store engine for Plume.
//!
//! This crate is the heart of Plume. [`PostStore`] owns the authoritative
//! mapping from (owner, title) to a live post record and exposes the four
//! operations — create, update, delete, list — with field validation,
//! ownership enforcement, deterministic address derivation, and deposit
//! reclamation on delete.
//!
//! Per-key lifecycle: `ABSENT → LIVE` (create), `LIVE → LIVE` (update,
//! possibly relocating the record when the title changes), `LIVE → ABSENT`
//! (delete, refunding the reserved deposit). Every operation is atomic:
//! either all validations pass and the full transition commits, or nothing
//! is mutated and a [`PostError`] is returned.

pub mod error;
pub mod events;
pub mod store;
pub mod validation;

pub use error::{PostError, PostResult};
pub use events::{EventSink, NullSink, PostEvent, VecSink};
pub use store::PostStore;
pub use validation::{validate_content, validate_title};
