//! Property Tests: Canonical Encoding
//!
//! Verifies the length and determinism invariants the downstream verifier
//! depends on: payload length is constant per flow regardless of input
//! content, and identical inputs always produce identical bytes.

use attest_core::{encode, Facts, DOMAIN_PAYLOAD_LEN, SUBSCRIPTION_PAYLOAD_LEN, TEXT_FIELD_LEN};
use proptest::prelude::*;

/// ASCII strings within the fixed field width
fn text_field() -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[ -~]{{0,{TEXT_FIELD_LEN}}}"))
        .expect("valid regex")
}

proptest! {
    #[test]
    fn subscription_payload_length_is_constant(
        plan_id in text_field(),
        age_days in 0i64..=i64::from(u32::MAX),
        issued_at in 0i64..=i64::from(u32::MAX),
    ) {
        let facts = Facts::Subscription { plan_id, age_days };
        let payload = encode(&facts, issued_at).unwrap();
        prop_assert_eq!(payload.len(), SUBSCRIPTION_PAYLOAD_LEN);
    }

    #[test]
    fn domain_payload_length_is_constant(
        domain in text_field(),
        issued_at in 0i64..=i64::from(u32::MAX),
    ) {
        let payload = encode(&Facts::Domain { domain }, issued_at).unwrap();
        prop_assert_eq!(payload.len(), DOMAIN_PAYLOAD_LEN);
    }

    #[test]
    fn encoding_is_deterministic(
        plan_id in text_field(),
        age_days in 0i64..=i64::from(u32::MAX),
        issued_at in 0i64..=i64::from(u32::MAX),
    ) {
        let facts = Facts::Subscription { plan_id, age_days };
        let first = encode(&facts, issued_at).unwrap();
        let second = encode(&facts, issued_at).unwrap();
        prop_assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn distinct_timestamps_change_the_payload(
        domain in text_field(),
        issued_at in 0i64..i64::from(u32::MAX),
    ) {
        let a = encode(&Facts::Domain { domain: domain.clone() }, issued_at).unwrap();
        let b = encode(&Facts::Domain { domain }, issued_at + 1).unwrap();
        prop_assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
