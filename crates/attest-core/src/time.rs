//! Clock seam for issuance timestamps
//!
//! The orchestrator stamps `issued_at` itself, never trusting the caller.
//! Production uses [`SystemClock`]; tests inject [`FixedClock`] so payloads
//! and signatures are reproducible.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of Unix time in whole seconds
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in seconds
    fn unix_now(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            // Pre-epoch system clock; report as negative seconds so the
            // encoder rejects it instead of signing a bogus timestamp.
            Err(e) => -(e.duration().as_secs() as i64),
        }
    }
}

/// Fixed time for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_now(&self) -> i64 {
        self.0
    }
}
