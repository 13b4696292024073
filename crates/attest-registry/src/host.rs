//! Host-facing message layer.
//!
//! Speaks the JSON execute/query shapes a chain-style host exchanges with
//! the registry: stringified integers where the wire uses them, snake_case
//! message tags, and an event stream on accepted verifications. The admin
//! capability lives here, not in the core registry: only the configured
//! owner may register epochs.

use attest_core::{AttestError, AttestResult, EpochId, Proof};
use serde::{Deserialize, Serialize};

use crate::epoch::{Epoch, Witness};
use crate::registry::SharedEpochRegistry;
use crate::verifier::{ClaimVerifier, Verdict};

/// Mutating messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Register a new witness epoch
    AddEpoch {
        /// The witness set for the new epoch
        witness: Vec<Witness>,
        /// Required quorum, stringified uint as observed on the wire
        minimum_witness: String,
    },
    /// Verify a submitted proof
    VerifyProof {
        /// The proof bundle
        proof: Proof,
    },
}

/// Read-only queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Fetch one epoch by id (stringified uint)
    GetEpoch {
        /// Epoch id to fetch
        id: String,
    },
    /// List all assigned epoch ids
    GetAllEpoch {},
}

/// Response to [`QueryMsg::GetEpoch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEpochResponse {
    /// The requested epoch
    pub epoch: Epoch,
}

/// Response to [`QueryMsg::GetAllEpoch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAllEpochResponse {
    /// All assigned epoch ids, ascending
    pub ids: Vec<EpochId>,
}

/// An event emitted by a successful execute call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event kind, e.g. `epoch` or `signer`
    pub kind: String,
    /// Key/value attributes
    pub attributes: Vec<(String, String)>,
}

impl Event {
    fn new(kind: &str, key: &str, value: String) -> Self {
        Self {
            kind: kind.to_string(),
            attributes: vec![(key.to_string(), value)],
        }
    }
}

/// Outcome of a successful execute call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecuteOutcome {
    /// Events describing what the call did
    pub events: Vec<Event>,
    /// The verification verdict, for `verify_proof` calls
    pub verdict: Option<Verdict>,
}

/// In-process host embedding of the registry and verifier.
///
/// A rejected execute call returns before any state changes, so failures
/// never leave partial acceptance behind.
#[derive(Debug, Clone)]
pub struct AttestationHost {
    owner: String,
    registry: SharedEpochRegistry,
    verifier: ClaimVerifier,
}

impl AttestationHost {
    /// Create a host with an empty epoch history. `owner` is the only
    /// sender allowed to register epochs.
    pub fn new(owner: impl Into<String>, verifier: ClaimVerifier) -> Self {
        Self {
            owner: owner.into(),
            registry: SharedEpochRegistry::new(),
            verifier,
        }
    }

    /// The shared registry handle, for readers outside the message layer.
    pub fn registry(&self) -> &SharedEpochRegistry {
        &self.registry
    }

    /// Dispatch a mutating message. `now_s` is the host's notion of the
    /// current time (block time for a chain host).
    pub fn execute(
        &self,
        sender: &str,
        now_s: u64,
        msg: ExecuteMsg,
    ) -> AttestResult<ExecuteOutcome> {
        match msg {
            ExecuteMsg::AddEpoch {
                witness,
                minimum_witness,
            } => self.add_epoch(sender, now_s, witness, &minimum_witness),
            ExecuteMsg::VerifyProof { proof } => self.verify_proof(&proof),
        }
    }

    /// Dispatch a read-only query, returning its JSON response.
    pub fn query(&self, msg: QueryMsg) -> AttestResult<serde_json::Value> {
        let value = match msg {
            QueryMsg::GetEpoch { id } => {
                let id: EpochId = id
                    .parse()
                    .map_err(|_| AttestError::malformed(format!("epoch id {id:?} is not a uint")))?;
                let epoch = self.registry.get_epoch(id)?;
                serde_json::to_value(GetEpochResponse { epoch })
            }
            QueryMsg::GetAllEpoch {} => serde_json::to_value(GetAllEpochResponse {
                ids: self.registry.epoch_ids(),
            }),
        };
        value.map_err(|e| AttestError::malformed(format!("response encoding failed: {e}")))
    }

    fn add_epoch(
        &self,
        sender: &str,
        now_s: u64,
        witness: Vec<Witness>,
        minimum_witness: &str,
    ) -> AttestResult<ExecuteOutcome> {
        if sender != self.owner {
            return Err(AttestError::Unauthorized);
        }
        let minimum: u32 = minimum_witness.parse().map_err(|_| {
            AttestError::malformed(format!("minimum_witness {minimum_witness:?} is not a uint"))
        })?;

        let epoch = self.registry.add_epoch(witness, minimum, now_s)?;
        Ok(ExecuteOutcome {
            events: vec![Event::new("epoch", "id", epoch.id.to_string())],
            verdict: None,
        })
    }

    fn verify_proof(&self, proof: &Proof) -> AttestResult<ExecuteOutcome> {
        let verdict = self
            .registry
            .with_read(|registry| self.verifier.verify(registry, proof))?;

        let events = verdict
            .signers
            .iter()
            .map(|signer| Event::new("signer", "sig", signer.to_string()))
            .collect();
        Ok(ExecuteOutcome {
            events,
            verdict: Some(verdict),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_msg_wire_shape() {
        let json = serde_json::json!({
            "add_epoch": {
                "witness": [
                    { "address": "0x244897572368eadf65bfbc5aec98d8e5443a9072",
                      "host": "https://witness.example" }
                ],
                "minimum_witness": "1"
            }
        });
        let msg: ExecuteMsg = serde_json::from_value(json).unwrap();
        assert!(matches!(msg, ExecuteMsg::AddEpoch { .. }));
    }

    #[test]
    fn test_query_msg_wire_shape() {
        let json = serde_json::json!({ "get_epoch": { "id": "1" } });
        let msg: QueryMsg = serde_json::from_value(json).unwrap();
        assert_eq!(
            msg,
            QueryMsg::GetEpoch {
                id: "1".to_string()
            }
        );
    }

    #[test]
    fn test_only_owner_may_add_epoch() {
        let host = AttestationHost::new("owner0000", ClaimVerifier::new());
        let msg = ExecuteMsg::AddEpoch {
            witness: vec![Witness {
                address: "0x244897572368eadf65bfbc5aec98d8e5443a9072".parse().unwrap(),
                host: "https://witness.example".into(),
            }],
            minimum_witness: "1".into(),
        };

        let err = host.execute("user0000", 0, msg.clone()).unwrap_err();
        assert_eq!(err, AttestError::Unauthorized);
        assert!(host.registry().epoch_ids().is_empty());

        host.execute("owner0000", 0, msg).unwrap();
        assert_eq!(host.registry().epoch_ids(), vec![1]);
    }

    #[test]
    fn test_non_numeric_minimum_witness_is_malformed() {
        let host = AttestationHost::new("owner0000", ClaimVerifier::new());
        let msg = ExecuteMsg::AddEpoch {
            witness: vec![],
            minimum_witness: "two".into(),
        };
        let err = host.execute("owner0000", 0, msg).unwrap_err();
        assert!(matches!(err, AttestError::MalformedMessage { .. }));
    }

    #[test]
    fn test_malformed_query_id() {
        let host = AttestationHost::new("owner0000", ClaimVerifier::new());
        let err = host
            .query(QueryMsg::GetEpoch { id: "abc".into() })
            .unwrap_err();
        assert!(matches!(err, AttestError::MalformedMessage { .. }));
    }
}
