//! Windowed Pedersen hash over Baby Jubjub
//!
//! Message bits (LSB-first within each byte) are split into 200-bit
//! segments of fifty 4-bit windows. A window with bits `b0..b3` encodes
//! the value `1 + b0 + 2*b1 + 4*b2`, negated when `b3` is set, weighted by
//! `2^(5*j)` for window index `j` within its segment. Each segment scalar
//! multiplies an independent generator and the results are summed.
//!
//! The maximum segment scalar stays below 2^249, under the subgroup order,
//! so distinct bit strings map to distinct scalars per segment and the
//! hash is collision resistant assuming discrete log hardness across the
//! independently derived generators.

use ark_ec::{AffineRepr, CurveGroup};
use ark_ed_on_bn254::{EdwardsAffine, EdwardsProjective, Fq, Fr};
use ark_ff::PrimeField;
use ark_std::{One, Zero};
use once_cell::sync::Lazy;

/// Bits per window
const WINDOW_BITS: usize = 4;

/// Windows per segment
const WINDOWS_PER_SEGMENT: usize = 50;

/// Bits consumed by one segment generator
const BITS_PER_SEGMENT: usize = WINDOW_BITS * WINDOWS_PER_SEGMENT;

/// Segments precomputed at first use; covers messages up to 200 bytes,
/// comfortably above the largest signing input (two packed points plus a
/// 56-byte payload). Longer messages derive further generators on demand.
const PRECOMPUTED_SEGMENTS: usize = 8;

/// Domain separation tag for generator derivation
const GENERATOR_DOMAIN: &[u8] = b"attest.pedersen.generator.v1";

static GENERATORS: Lazy<Vec<EdwardsProjective>> = Lazy::new(|| {
    (0..PRECOMPUTED_SEGMENTS)
        .map(|i| derive_generator(i).into_group())
        .collect()
});

/// Deterministically derive the generator for one segment
///
/// Hash the domain tag, segment index, and a retry counter; interpret the
/// digest as a candidate y-coordinate and recover a point, clearing the
/// cofactor so the result lands in the prime-order subgroup. Increment the
/// counter until a non-identity point appears.
fn derive_generator(segment: usize) -> EdwardsAffine {
    let mut counter: u32 = 0;
    loop {
        let mut hasher = blake3::Hasher::new();
        hasher.update(GENERATOR_DOMAIN);
        hasher.update(&(segment as u32).to_le_bytes());
        hasher.update(&counter.to_le_bytes());
        let digest = hasher.finalize();
        let bytes = digest.as_bytes();

        // 248 bits keep the candidate below the base-field modulus; the
        // top byte picks which of the two roots to take.
        let greatest = bytes[31] & 1 == 1;
        let y = Fq::from_le_bytes_mod_order(&bytes[..31]);
        if let Some(point) = EdwardsAffine::get_point_from_y_unchecked(y, greatest) {
            let point = point.mul_by_cofactor();
            if !point.is_zero() {
                return point;
            }
        }
        counter += 1;
    }
}

fn generator(segment: usize) -> EdwardsProjective {
    GENERATORS
        .get(segment)
        .copied()
        .unwrap_or_else(|| derive_generator(segment).into_group())
}

/// Message bits, LSB-first within each byte
fn le_bits(message: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(message.len() * 8);
    for byte in message {
        for i in 0..8 {
            bits.push(byte >> i & 1 == 1);
        }
    }
    bits
}

/// Hash a byte message to a curve point
///
/// Deterministic and pure; the empty message maps to the identity.
pub fn pedersen_hash(message: &[u8]) -> EdwardsAffine {
    let bits = le_bits(message);
    let mut acc = EdwardsProjective::zero();

    for (segment_index, segment) in bits.chunks(BITS_PER_SEGMENT).enumerate() {
        let mut scalar = Fr::zero();
        let mut weight = Fr::one();
        for window in segment.chunks(WINDOW_BITS) {
            let bit = |i: usize| window.get(i).copied().unwrap_or(false);
            let mut value = 1u64;
            if bit(0) {
                value += 1;
            }
            if bit(1) {
                value += 2;
            }
            if bit(2) {
                value += 4;
            }
            let mut term = Fr::from(value) * weight;
            if bit(3) {
                term = -term;
            }
            scalar += term;
            weight *= Fr::from(1u64 << (WINDOW_BITS + 1));
        }
        acc += generator(segment_index) * scalar;
    }

    acc.into_affine()
}
