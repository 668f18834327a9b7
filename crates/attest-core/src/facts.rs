//! Attested fact tuples
//!
//! Each attestation flow produces one fact tuple. The kind tag selects the
//! canonical byte layout in [`crate::encode`]; adding a flow means adding a
//! variant here and a layout there, never changing an existing layout.

use serde::{Deserialize, Serialize};

/// Named attestation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttestationKind {
    /// Subscription plan + age facts, backed by a billing provider
    Subscription,
    /// Verified email domain fact, backed by an identity provider
    Domain,
}

/// Facts to attest, one variant per flow
///
/// `age_days` is carried as `i64` so that a subscription with a start time
/// in the future surfaces as an encoding failure instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facts {
    /// Subscription flow: plan identifier and whole-day subscription age
    Subscription {
        /// Provider plan identifier, at most [`crate::TEXT_FIELD_LEN`] bytes
        plan_id: String,
        /// Whole days elapsed since the subscription started
        age_days: i64,
    },
    /// Domain flow: verified email domain
    Domain {
        /// Domain part of the verified email, at most
        /// [`crate::TEXT_FIELD_LEN`] bytes
        domain: String,
    },
}

impl Facts {
    /// Flow kind tag for this fact tuple
    pub fn kind(&self) -> AttestationKind {
        match self {
            Facts::Subscription { .. } => AttestationKind::Subscription,
            Facts::Domain { .. } => AttestationKind::Domain,
        }
    }
}
