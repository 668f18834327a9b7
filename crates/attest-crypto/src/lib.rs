//! Attest Crypto
//!
//! Deterministic EdDSA over Baby Jubjub with a Pedersen message hash.
//!
//! The oracle signs fixed-width canonical payloads for consumption inside
//! arithmetic circuits, so the message digest is built from elliptic-curve
//! point additions (a windowed Pedersen hash) instead of a bit-oriented
//! hash function, and the Schnorr-style signature uses a deterministically
//! derived nonce: the same payload under the same key always yields the
//! same signature bytes.
//!
//! Layout of responsibilities:
//! - [`pedersen`]: windowed Pedersen hash and its generator table
//! - [`eddsa`]: key material, signing, packed signatures, verification
//!
//! Verification is exposed for downstream consumers and the test suite;
//! the oracle itself never verifies what it signs.

#![forbid(unsafe_code)]

pub mod eddsa;
pub mod errors;
pub mod pedersen;

pub use eddsa::{sign, verify, OracleKeyMaterial, PublicKey, Signature, SIGNATURE_LEN};
pub use errors::CryptoError;
pub use pedersen::pedersen_hash;

/// Result alias for crypto operations
pub type Result<T> = std::result::Result<T, CryptoError>;
