//! Canonical fixed-width encoding
//!
//! Layouts are offset-stable and hard-coded by downstream verifiers:
//!
//! - subscription: `[plan_id:48][age_days:4][issued_at:4]` = 56 bytes
//! - domain:       `[domain:48][issued_at:4]`              = 52 bytes
//!
//! Text fields are raw bytes right-padded with 0x20; integers are 4-byte
//! little-endian u32. Identical inputs always produce identical bytes.

use crate::errors::EncodingError;
use crate::facts::Facts;
use crate::Result;

/// Fixed width of every text field, in bytes
pub const TEXT_FIELD_LEN: usize = 48;

/// Total payload length of the subscription flow
pub const SUBSCRIPTION_PAYLOAD_LEN: usize = TEXT_FIELD_LEN + 8;

/// Total payload length of the domain flow
pub const DOMAIN_PAYLOAD_LEN: usize = TEXT_FIELD_LEN + 4;

/// Fixed-width byte payload over which the oracle signs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPayload(Vec<u8>);

impl CanonicalPayload {
    /// Payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload length in bytes; constant per [`crate::AttestationKind`]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for payloads produced by [`encode`]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encode a fact tuple plus issuance timestamp into its canonical payload
///
/// Pure and total for valid inputs; the only failures are oversized text
/// fields and integers outside the u32 range.
pub fn encode(facts: &Facts, issued_at: i64) -> Result<CanonicalPayload> {
    let mut buf = Vec::with_capacity(SUBSCRIPTION_PAYLOAD_LEN);
    match facts {
        Facts::Subscription { plan_id, age_days } => {
            push_text(&mut buf, "plan_id", plan_id)?;
            push_u32(&mut buf, "age_days", *age_days)?;
            push_u32(&mut buf, "issued_at", issued_at)?;
            debug_assert_eq!(buf.len(), SUBSCRIPTION_PAYLOAD_LEN);
        }
        Facts::Domain { domain } => {
            push_text(&mut buf, "domain", domain)?;
            push_u32(&mut buf, "issued_at", issued_at)?;
            debug_assert_eq!(buf.len(), DOMAIN_PAYLOAD_LEN);
        }
    }
    Ok(CanonicalPayload(buf))
}

/// Raw bytes right-padded with spaces to [`TEXT_FIELD_LEN`]
fn push_text(buf: &mut Vec<u8>, field: &'static str, value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    if bytes.len() > TEXT_FIELD_LEN {
        return Err(EncodingError::TooLong {
            field,
            len: bytes.len(),
            max: TEXT_FIELD_LEN,
        });
    }
    buf.extend_from_slice(bytes);
    buf.resize(buf.len() + (TEXT_FIELD_LEN - bytes.len()), 0x20);
    Ok(())
}

/// 4-byte little-endian u32 with an explicit range check
fn push_u32(buf: &mut Vec<u8>, field: &'static str, value: i64) -> Result<()> {
    let value = u32::try_from(value).map_err(|_| EncodingError::OutOfRange { field, value })?;
    buf.extend_from_slice(&value.to_le_bytes());
    Ok(())
}
