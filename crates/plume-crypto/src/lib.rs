//! Cryptographic boundary for Plume.
//!
//! One concern lives here: proving who a caller is. [`AuthorKey`] seals
//! operations into signed [`Envelope`]s, and [`Envelope::verify`] hands the
//! post store a proven [`AuthorId`](plume_types::AuthorId). The store never
//! authenticates anyone itself; it only compares identities.
//!
//! All crypto operations wrap established libraries — no custom
//! cryptography.

pub mod envelope;

pub use envelope::{AuthorKey, Envelope, SignatureError};
