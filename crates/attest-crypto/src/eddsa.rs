//! Deterministic EdDSA over Baby Jubjub
//!
//! Schnorr-style construction in the prime-order subgroup (cofactor 8):
//!
//! - secret scalar `s`, public key `A = B*s`
//! - nonce `r = Sha512(expand || payload) mod order`, where `expand` is the
//!   second half of `Sha512(secret bytes)`; no external randomness
//! - challenge `h = Fr(compress(Pedersen(compress(R) || compress(A) || payload)))`
//! - `S = r + h*s`; packed signature is `compress(R) || le(S)`, 64 bytes
//!
//! Verification checks the cofactor-cleared equation
//! `8*B*S == 8*R + 8*A*h` and is computable from the public key alone.

use ark_ec::{AffineRepr, CurveGroup};
use ark_ed_on_bn254::{EdwardsAffine, EdwardsProjective, Fr};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::Zero;
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::errors::CryptoError;
use crate::pedersen::pedersen_hash;
use crate::Result;

/// Packed signature length: compressed R point plus scalar S
pub const SIGNATURE_LEN: usize = 64;

/// Oracle public key, a point in the prime-order subgroup
pub type PublicKey = EdwardsAffine;

/// Process-wide oracle signing key
///
/// Built once at startup from the hex-encoded secret scalar and held
/// immutably for the process lifetime. Never logged; `Debug` prints only
/// the derived public key.
pub struct OracleKeyMaterial {
    scalar: Fr,
    /// Nonce derivation prefix, second half of `Sha512(secret bytes)`
    expand: [u8; 32],
    public: EdwardsAffine,
}

impl OracleKeyMaterial {
    /// Parse key material from a hex-encoded 32-byte little-endian scalar
    ///
    /// Rejects wrong lengths, non-hex input, scalars at or above the
    /// subgroup order, and the zero scalar.
    pub fn from_hex(hex_scalar: &str) -> Result<Self> {
        let bytes = hex::decode(hex_scalar.trim())
            .map_err(|e| CryptoError::InvalidKey(format!("not hex: {e}")))?;
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let scalar = Fr::deserialize_compressed(&bytes[..])
            .map_err(|_| CryptoError::InvalidKey("non-canonical scalar".to_string()))?;
        if scalar.is_zero() {
            return Err(CryptoError::InvalidKey("zero scalar".to_string()));
        }

        let digest = Sha512::digest(&bytes);
        let mut expand = [0u8; 32];
        expand.copy_from_slice(&digest[32..]);

        let public = (EdwardsAffine::generator() * scalar).into_affine();
        Ok(Self {
            scalar,
            expand,
            public,
        })
    }

    /// Derived public key
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// Compressed public key bytes
    pub fn public_key_bytes(&self) -> [u8; 32] {
        compress_point(&self.public)
    }

    /// Compressed public key as lowercase hex
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }
}

impl Drop for OracleKeyMaterial {
    fn drop(&mut self) {
        self.expand.zeroize();
    }
}

impl std::fmt::Debug for OracleKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleKeyMaterial")
            .field("public", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

/// Packed attestation signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    r: EdwardsAffine,
    s: Fr,
}

impl Signature {
    /// Pack into the fixed 64-byte wire form
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..32].copy_from_slice(&compress_point(&self.r));
        bytes[32..].copy_from_slice(&compress_scalar(&self.s));
        bytes
    }

    /// Unpack from the 64-byte wire form, validating point and scalar
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CryptoError::MalformedSignature(format!(
                "expected {SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let r = EdwardsAffine::deserialize_compressed(&bytes[..32])
            .map_err(|_| CryptoError::MalformedSignature("invalid R point".to_string()))?;
        let s = Fr::deserialize_compressed(&bytes[32..])
            .map_err(|_| CryptoError::MalformedSignature("non-canonical S scalar".to_string()))?;
        Ok(Self { r, s })
    }

    /// Lowercase hex of the packed form
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// Sign a canonical payload
///
/// Deterministic: the same payload under the same key always produces the
/// same signature bytes. Never fails for valid key material.
pub fn sign(key: &OracleKeyMaterial, payload: &[u8]) -> Signature {
    let mut hasher = Sha512::new();
    hasher.update(key.expand);
    hasher.update(payload);
    let digest = hasher.finalize();
    let nonce = Fr::from_le_bytes_mod_order(&digest[..]);

    let r = (EdwardsAffine::generator() * nonce).into_affine();
    let h = challenge(&r, &key.public, payload);
    let s = nonce + h * key.scalar;
    Signature { r, s }
}

/// Verify a signature against the public key alone
pub fn verify(public: &PublicKey, payload: &[u8], signature: &Signature) -> Result<()> {
    let h = challenge(&signature.r, public, payload);
    let eight = Fr::from(8u64);

    let lhs = EdwardsAffine::generator() * (signature.s * eight);
    let rhs = signature.r.into_group() * eight + public.into_group() * (h * eight);
    if lhs == rhs {
        Ok(())
    } else {
        Err(CryptoError::VerificationFailed)
    }
}

/// Pedersen challenge over `compress(R) || compress(A) || payload`
fn challenge(r: &EdwardsAffine, public: &PublicKey, payload: &[u8]) -> Fr {
    let mut message = Vec::with_capacity(64 + payload.len());
    message.extend_from_slice(&compress_point(r));
    message.extend_from_slice(&compress_point(public));
    message.extend_from_slice(payload);
    let point = pedersen_hash(&message);
    Fr::from_le_bytes_mod_order(&compress_point(&point))
}

#[allow(clippy::expect_used)]
fn compress_point(point: &EdwardsAffine) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    point
        .serialize_compressed(&mut bytes[..])
        .expect("compressed point is 32 bytes");
    bytes
}

#[allow(clippy::expect_used)]
fn compress_scalar(scalar: &Fr) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    scalar
        .serialize_compressed(&mut bytes[..])
        .expect("compressed scalar is 32 bytes");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_from_byte(byte: u8) -> OracleKeyMaterial {
        let mut bytes = [0u8; 32];
        bytes[0] = byte;
        OracleKeyMaterial::from_hex(&hex::encode(bytes)).unwrap()
    }

    #[test]
    fn signing_is_deterministic() {
        let key = key_from_byte(7);
        let payload = [0x41u8; 56];
        assert_eq!(sign(&key, &payload).to_bytes(), sign(&key, &payload).to_bytes());
    }

    #[test]
    fn valid_signature_verifies() {
        let key = key_from_byte(9);
        let payload = [0x42u8; 52];
        let sig = sign(&key, &payload);
        assert!(verify(&key.public_key(), &payload, &sig).is_ok());
    }

    #[test]
    fn wrong_key_rejects() {
        let key = key_from_byte(9);
        let other = key_from_byte(10);
        let payload = [0x42u8; 52];
        let sig = sign(&key, &payload);
        assert_eq!(
            verify(&other.public_key(), &payload, &sig),
            Err(CryptoError::VerificationFailed)
        );
    }

    #[test]
    fn signature_round_trips_through_bytes() {
        let key = key_from_byte(3);
        let sig = sign(&key, b"round trip payload");
        let unpacked = Signature::from_bytes(&sig.to_bytes()).unwrap();
        assert_eq!(sig, unpacked);
    }

    #[test]
    fn packed_signature_is_fixed_size() {
        let key = key_from_byte(3);
        assert_eq!(sign(&key, &[0u8; 52]).to_bytes().len(), SIGNATURE_LEN);
        assert_eq!(sign(&key, &[0u8; 56]).to_bytes().len(), SIGNATURE_LEN);
    }

    #[test]
    fn key_rejects_wrong_length() {
        assert!(matches!(
            OracleKeyMaterial::from_hex("abcd"),
            Err(CryptoError::InvalidKey(_))
        ));
    }

    #[test]
    fn key_rejects_non_hex() {
        let input = "zz".repeat(32);
        assert!(matches!(
            OracleKeyMaterial::from_hex(&input),
            Err(CryptoError::InvalidKey(_))
        ));
    }

    #[test]
    fn key_rejects_zero_scalar() {
        let input = "00".repeat(32);
        assert!(matches!(
            OracleKeyMaterial::from_hex(&input),
            Err(CryptoError::InvalidKey(_))
        ));
    }

    #[test]
    fn key_rejects_non_canonical_scalar() {
        // 2^256 - 1 is far above the subgroup order
        let input = "ff".repeat(32);
        assert!(matches!(
            OracleKeyMaterial::from_hex(&input),
            Err(CryptoError::InvalidKey(_))
        ));
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let key = key_from_byte(5);
        let rendered = format!("{key:?}");
        assert!(rendered.contains(&key.public_key_hex()));
        assert!(!rendered.contains("scalar"));
    }
}
