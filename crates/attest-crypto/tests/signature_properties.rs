//! Property Tests: Signature Scheme
//!
//! Independent verification must accept every signature the signer
//! produces and reject any single-bit corruption of the payload or the
//! packed signature, holding only the public key.

use attest_crypto::{sign, verify, OracleKeyMaterial, Signature};
use proptest::prelude::*;

fn test_key() -> OracleKeyMaterial {
    let mut bytes = [0u8; 32];
    bytes[..4].copy_from_slice(&[0x5e, 0xc4, 0x00, 0x01]);
    OracleKeyMaterial::from_hex(&hex::encode(bytes)).unwrap()
}

#[test]
fn every_payload_bit_flip_is_rejected() {
    let key = test_key();
    let payload = [0x37u8; 56];
    let sig = sign(&key, &payload);
    let public = key.public_key();

    assert!(verify(&public, &payload, &sig).is_ok());
    for byte in 0..payload.len() {
        for bit in 0..8 {
            let mut corrupted = payload;
            corrupted[byte] ^= 1 << bit;
            assert!(
                verify(&public, &corrupted, &sig).is_err(),
                "payload bit {bit} of byte {byte} accepted"
            );
        }
    }
}

#[test]
fn every_signature_bit_flip_is_rejected() {
    let key = test_key();
    let payload = [0x37u8; 52];
    let sig_bytes = sign(&key, &payload).to_bytes();
    let public = key.public_key();

    for byte in 0..sig_bytes.len() {
        for bit in 0..8 {
            let mut corrupted = sig_bytes;
            corrupted[byte] ^= 1 << bit;
            // Corruption either breaks unpacking or fails the Schnorr check.
            let rejected = match Signature::from_bytes(&corrupted) {
                Ok(sig) => verify(&public, &payload, &sig).is_err(),
                Err(_) => true,
            };
            assert!(rejected, "signature bit {bit} of byte {byte} accepted");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn signatures_verify_and_are_deterministic(payload in proptest::collection::vec(any::<u8>(), 52..=56)) {
        let key = test_key();
        let first = sign(&key, &payload);
        let second = sign(&key, &payload);
        prop_assert_eq!(first.to_bytes(), second.to_bytes());
        prop_assert!(verify(&key.public_key(), &payload, &first).is_ok());
    }
}
