//! Attest Core
//!
//! Fact model and canonical encoding for oracle attestations.
//!
//! An attestation binds a small set of verified facts (subscription plan and
//! age, or an email domain) plus an issuance timestamp into a fixed-width
//! byte payload. Downstream zero-knowledge verifiers hard-code the byte
//! offsets of every field, so the encoding here is deterministic, padded to
//! constant length, and never changes layout without a new
//! [`AttestationKind`].
//!
//! This crate is pure: no I/O, no clock reads (the [`Clock`] trait is only
//! the seam through which callers inject time).

#![forbid(unsafe_code)]

pub mod encode;
pub mod errors;
pub mod facts;
pub mod time;

pub use encode::{
    encode, CanonicalPayload, DOMAIN_PAYLOAD_LEN, SUBSCRIPTION_PAYLOAD_LEN, TEXT_FIELD_LEN,
};
pub use errors::{EncodingError, ErrorBody};
pub use facts::{AttestationKind, Facts};
pub use time::{Clock, FixedClock, SystemClock};

/// Result alias for encoding operations
pub type Result<T> = std::result::Result<T, EncodingError>;
