//! Verification policy hooks and the clock seam.
//!
//! Quorum and identifier checks are hard invariants of the protocol. The
//! checks here are host configuration: whether old claims age out, and
//! whether claims must reference the current epoch instead of any
//! historical one. Both default to off, so historical epochs stay
//! acceptable indefinitely unless the host opts in.

use std::time::{SystemTime, UNIX_EPOCH};

/// Host-configurable checks applied during verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationPolicy {
    /// Reject claims older than this many seconds, judged against the
    /// verifier's clock. `None` disables the check.
    pub max_claim_age_s: Option<u64>,
    /// Reject claims that reference any epoch but the current one.
    pub require_current_epoch: bool,
}

impl VerificationPolicy {
    /// The permissive default: no age bound, historical epochs accepted.
    pub fn permissive() -> Self {
        Self::default()
    }
}

/// Source of "now" for the claim-age policy.
///
/// Verification itself needs no clock; only the age policy does, and hosts
/// differ on where time comes from (block time, system clock, test fixture).
pub trait Clock {
    /// Current time, seconds since the Unix epoch.
    fn now_s(&self) -> u64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_s(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_s(&self) -> u64 {
        self.0
    }
}
