//! Append-only epoch storage.
//!
//! An arena of epoch records indexed by sequential id plus a current-id
//! counter, the abstract `epoch_id -> Epoch` map the verifier reads. The
//! store never overwrites: a collision on append means the caller broke the
//! sequential-id contract, and the record already present wins.

use std::collections::BTreeMap;

use attest_core::{AttestError, AttestResult, EpochId};

use crate::epoch::Epoch;

/// Append-only mapping from epoch id to epoch record.
#[derive(Debug, Clone, Default)]
pub struct EpochStore {
    epochs: BTreeMap<EpochId, Epoch>,
    last_id: EpochId,
}

impl EpochStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next appended epoch must carry.
    pub fn next_id(&self) -> EpochId {
        self.last_id + 1
    }

    /// Append an epoch. The epoch's id must be [`Self::next_id`]; an
    /// occupied slot is never overwritten.
    pub fn append(&mut self, epoch: Epoch) -> AttestResult<()> {
        if epoch.id != self.next_id() || self.epochs.contains_key(&epoch.id) {
            return Err(AttestError::invalid_epoch_config(format!(
                "epoch id {} breaks the append-only sequence (next is {})",
                epoch.id,
                self.next_id()
            )));
        }
        self.last_id = epoch.id;
        self.epochs.insert(epoch.id, epoch);
        Ok(())
    }

    /// Look up an epoch by id.
    pub fn get(&self, id: EpochId) -> AttestResult<&Epoch> {
        self.epochs
            .get(&id)
            .ok_or(AttestError::EpochNotFound { id })
    }

    /// The epoch with the highest id.
    pub fn current(&self) -> AttestResult<&Epoch> {
        self.epochs
            .values()
            .next_back()
            .ok_or(AttestError::NoEpochsRegistered)
    }

    /// All assigned epoch ids, ascending.
    pub fn ids(&self) -> Vec<EpochId> {
        self.epochs.keys().copied().collect()
    }

    /// Number of stored epochs.
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    /// Whether the store holds no epochs.
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }
}
