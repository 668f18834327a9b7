//! Crypto error taxonomy

/// Failures in key handling, signature packing, and verification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// Key material is the wrong length or not a canonical nonzero scalar
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// Packed signature bytes do not decode to a curve point and scalar
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// The Schnorr equation does not hold for the given payload and key
    #[error("signature verification failed")]
    VerificationFailed,
}
