//! Epoch registration API.
//!
//! `EpochRegistry` is the single-writer mutation surface over the store:
//! it validates witness sets, assigns the next sequential id, and appends.
//! Reads (`get_epoch`, `current_epoch`) are pure lookups over immutable
//! records. For concurrent in-process embeddings, [`SharedEpochRegistry`]
//! serializes appends behind a write lock while readers take atomic
//! snapshots, so the sequential-id invariant holds and no reader observes a
//! partially written epoch.

use std::collections::HashSet;
use std::sync::Arc;

use attest_core::{AttestError, AttestResult, EpochId, WitnessAddress};
use parking_lot::RwLock;

use crate::epoch::{Epoch, Witness};
use crate::store::EpochStore;

/// Mutation and lookup API over the append-only epoch store.
#[derive(Debug, Clone, Default)]
pub struct EpochRegistry {
    store: EpochStore,
}

impl EpochRegistry {
    /// Create a registry with an empty epoch history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new epoch with the next sequential id.
    ///
    /// Validates that the witness list is non-empty with unique addresses
    /// and that `1 <= minimum_witness_count <= witnesses.len()`; failure is
    /// [`AttestError::InvalidEpochConfig`]. Existing epochs are never
    /// touched.
    pub fn add_epoch(
        &mut self,
        witnesses: Vec<Witness>,
        minimum_witness_count: u32,
        created_at_s: u64,
    ) -> AttestResult<Epoch> {
        validate_epoch_config(&witnesses, minimum_witness_count)?;

        let epoch = Epoch {
            id: self.store.next_id(),
            witnesses,
            minimum_witness_count,
            created_at_s,
        };
        self.store.append(epoch.clone())?;

        tracing::info!(
            epoch = epoch.id,
            witnesses = epoch.witnesses.len(),
            quorum = epoch.minimum_witness_count,
            "registered new epoch"
        );
        Ok(epoch)
    }

    /// Look up an epoch by id.
    pub fn get_epoch(&self, id: EpochId) -> AttestResult<&Epoch> {
        self.store.get(id)
    }

    /// The most recently registered epoch.
    pub fn current_epoch(&self) -> AttestResult<&Epoch> {
        self.store.current()
    }

    /// All assigned epoch ids, ascending.
    pub fn epoch_ids(&self) -> Vec<EpochId> {
        self.store.ids()
    }
}

fn validate_epoch_config(witnesses: &[Witness], minimum_witness_count: u32) -> AttestResult<()> {
    if witnesses.is_empty() {
        return Err(AttestError::invalid_epoch_config("witness list is empty"));
    }

    let mut seen: HashSet<WitnessAddress> = HashSet::with_capacity(witnesses.len());
    for witness in witnesses {
        if !seen.insert(witness.address) {
            return Err(AttestError::invalid_epoch_config(format!(
                "duplicate witness address {}",
                witness.address
            )));
        }
    }

    if minimum_witness_count == 0 {
        return Err(AttestError::invalid_epoch_config(
            "minimum witness count must be at least 1",
        ));
    }
    if minimum_witness_count as usize > witnesses.len() {
        return Err(AttestError::invalid_epoch_config(format!(
            "minimum witness count {} exceeds witness set size {}",
            minimum_witness_count,
            witnesses.len()
        )));
    }
    Ok(())
}

/// Clonable handle sharing one registry between a writer and many readers.
///
/// Appends take the write lock, which provides the atomic
/// "append next id" the sequential-id invariant needs. Reads clone the
/// record out under the read lock, so callers hold no lock while verifying.
#[derive(Debug, Clone, Default)]
pub struct SharedEpochRegistry {
    inner: Arc<RwLock<EpochRegistry>>,
}

impl SharedEpochRegistry {
    /// Create a shared handle over an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialized epoch registration. See [`EpochRegistry::add_epoch`].
    pub fn add_epoch(
        &self,
        witnesses: Vec<Witness>,
        minimum_witness_count: u32,
        created_at_s: u64,
    ) -> AttestResult<Epoch> {
        self.inner
            .write()
            .add_epoch(witnesses, minimum_witness_count, created_at_s)
    }

    /// Snapshot an epoch by id.
    pub fn get_epoch(&self, id: EpochId) -> AttestResult<Epoch> {
        self.inner.read().get_epoch(id).cloned()
    }

    /// Snapshot the most recently registered epoch.
    pub fn current_epoch(&self) -> AttestResult<Epoch> {
        self.inner.read().current_epoch().cloned()
    }

    /// All assigned epoch ids, ascending.
    pub fn epoch_ids(&self) -> Vec<EpochId> {
        self.inner.read().epoch_ids()
    }

    /// Run `f` against a read snapshot of the registry.
    pub fn with_read<T>(&self, f: impl FnOnce(&EpochRegistry) -> T) -> T {
        f(&self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witness(byte: u8) -> Witness {
        Witness {
            address: WitnessAddress::from_bytes([byte; 20]),
            host: format!("https://w{byte}.example"),
        }
    }

    #[test]
    fn test_ids_increase_by_one_without_gaps() {
        let mut registry = EpochRegistry::new();
        for expected in 1..=5u64 {
            let epoch = registry
                .add_epoch(vec![witness(1), witness(2)], 1, 0)
                .unwrap();
            assert_eq!(epoch.id, expected);
        }
        assert_eq!(registry.epoch_ids(), vec![1, 2, 3, 4, 5]);
        assert_eq!(registry.current_epoch().unwrap().id, 5);
    }

    #[test]
    fn test_add_epoch_rejects_empty_witness_list() {
        let mut registry = EpochRegistry::new();
        let err = registry.add_epoch(vec![], 1, 0).unwrap_err();
        assert!(matches!(err, AttestError::InvalidEpochConfig { .. }));
    }

    #[test]
    fn test_add_epoch_rejects_duplicate_addresses() {
        let mut registry = EpochRegistry::new();
        let err = registry
            .add_epoch(vec![witness(1), witness(1)], 1, 0)
            .unwrap_err();
        assert!(matches!(err, AttestError::InvalidEpochConfig { .. }));
    }

    #[test]
    fn test_add_epoch_rejects_quorum_out_of_range() {
        let mut registry = EpochRegistry::new();
        let err = registry
            .add_epoch(vec![witness(1), witness(2)], 3, 0)
            .unwrap_err();
        assert!(matches!(err, AttestError::InvalidEpochConfig { .. }));

        let err = registry
            .add_epoch(vec![witness(1), witness(2)], 0, 0)
            .unwrap_err();
        assert!(matches!(err, AttestError::InvalidEpochConfig { .. }));
    }

    #[test]
    fn test_rejected_add_does_not_consume_an_id() {
        let mut registry = EpochRegistry::new();
        registry.add_epoch(vec![witness(1)], 1, 0).unwrap();
        registry.add_epoch(vec![], 1, 0).unwrap_err();
        let epoch = registry.add_epoch(vec![witness(2)], 1, 0).unwrap();
        assert_eq!(epoch.id, 2);
    }

    #[test]
    fn test_earlier_epochs_remain_after_rotation() {
        let mut registry = EpochRegistry::new();
        registry.add_epoch(vec![witness(1)], 1, 10).unwrap();
        registry.add_epoch(vec![witness(2)], 1, 20).unwrap();

        let first = registry.get_epoch(1).unwrap();
        assert_eq!(first.witnesses[0].address, witness(1).address);
        assert_eq!(registry.current_epoch().unwrap().id, 2);
    }

    #[test]
    fn test_shared_registry_serializes_appends() {
        let shared = SharedEpochRegistry::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let shared = shared.clone();
            handles.push(std::thread::spawn(move || {
                shared.add_epoch(vec![witness(1), witness(2)], 2, 0).unwrap()
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.epoch_ids(), (1..=8).collect::<Vec<_>>());
    }
}
