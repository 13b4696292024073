//! Witness and epoch records.

use attest_core::{EpochId, WitnessAddress};
use serde::{Deserialize, Serialize};

/// A witness identity authorized to attest to fetched data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    /// 20-byte signing identity
    pub address: WitnessAddress,
    /// Witness node endpoint; informational only, never dereferenced
    pub host: String,
}

/// A versioned, immutable snapshot of the trusted witness set and the
/// quorum it requires.
///
/// Epochs are never mutated or deleted after registration; rotating the
/// witness set appends a new epoch with the next sequential id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    /// Sequential epoch id, assigned from 1 upward
    pub id: EpochId,
    /// The witness set; addresses are unique within an epoch
    pub witnesses: Vec<Witness>,
    /// Minimum distinct witness signatures a claim needs
    pub minimum_witness_count: u32,
    /// Registration time, seconds since the Unix epoch; informational
    pub created_at_s: u64,
}

impl Epoch {
    /// Whether `address` belongs to this epoch's witness set.
    pub fn contains_address(&self, address: &WitnessAddress) -> bool {
        self.witnesses.iter().any(|w| w.address == *address)
    }
}
