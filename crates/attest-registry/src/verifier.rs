//! The claim verification protocol.
//!
//! A verification call is a pure decision over `(epoch history, proof)`:
//! resolve the claimed epoch, recompute the claim identifier from the
//! submitted claim info, recover every signer, and count the distinct
//! recovered addresses that belong to the epoch's witness set against its
//! quorum. Any failure is terminal for the call; nothing is retried and
//! nothing is mutated.

use std::collections::BTreeSet;

use attest_core::{claim_id, signing_digest, AttestError, AttestResult, EpochId, Proof, WitnessAddress};
use attest_crypto::{Secp256k1Recoverer, SignatureRecoverer};

use crate::policy::{Clock, SystemClock, VerificationPolicy};
use crate::registry::EpochRegistry;

/// The witnesses accepted toward quorum for a verified claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Epoch the claim was verified against
    pub epoch: EpochId,
    /// Distinct witness addresses whose signatures counted toward quorum
    pub signers: Vec<WitnessAddress>,
}

/// Stateless claim verifier.
///
/// Holds an injected signature recoverer and clock, so an alternate curve
/// or time source slots in without touching quorum logic, plus the host's
/// verification policy. Calls share no mutable state, so
/// one verifier may serve concurrent verifications.
#[derive(Debug, Clone, Default)]
pub struct ClaimVerifier<R = Secp256k1Recoverer, C = SystemClock> {
    recoverer: R,
    clock: C,
    policy: VerificationPolicy,
}

impl ClaimVerifier {
    /// Verifier with the default secp256k1 recoverer, system clock, and
    /// permissive policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default verifier with a specific policy.
    pub fn with_policy(policy: VerificationPolicy) -> Self {
        Self {
            recoverer: Secp256k1Recoverer,
            clock: SystemClock,
            policy,
        }
    }
}

impl<R: SignatureRecoverer, C: Clock> ClaimVerifier<R, C> {
    /// Verifier with injected recoverer and clock.
    pub fn with_parts(recoverer: R, clock: C, policy: VerificationPolicy) -> Self {
        Self {
            recoverer,
            clock,
            policy,
        }
    }

    /// Decide whether `proof` carries a quorum of valid witness signatures.
    ///
    /// Accept returns the distinct signers counted toward quorum. Reject
    /// returns the specific failure; callers can distinguish a malformed
    /// proof from insufficient quorum from unknown epoch state.
    pub fn verify(&self, registry: &EpochRegistry, proof: &Proof) -> AttestResult<Verdict> {
        let claim = &proof.signed_claim.claim;
        let epoch = registry.get_epoch(claim.epoch)?;

        if self.policy.require_current_epoch {
            let current = registry.current_epoch()?.id;
            if claim.epoch != current {
                return Err(AttestError::StaleEpoch {
                    claimed: claim.epoch,
                    current,
                });
            }
        }

        if let Some(max_age_s) = self.policy.max_claim_age_s {
            let age_s = self.clock.now_s().saturating_sub(claim.timestamp_s);
            if age_s > max_age_s {
                return Err(AttestError::ClaimExpired { age_s, max_age_s });
            }
        }

        // The identifier binds the signatures to the exact claim content:
        // substituting a different fetched payload while reusing valid
        // signature metadata fails here.
        let expected = claim_id(&proof.claim_info);
        if expected != claim.identifier {
            return Err(AttestError::IdentifierMismatch {
                expected,
                claimed: claim.identifier,
            });
        }

        let digest = signing_digest(claim);
        let mut signers: BTreeSet<WitnessAddress> = BTreeSet::new();
        for signature in &proof.signed_claim.signatures {
            let address = self.recoverer.recover(&digest, signature.as_ref())?;
            if epoch.contains_address(&address) {
                // A BTreeSet de-duplicates resubmitted signatures, so one
                // witness can never satisfy quorum alone.
                signers.insert(address);
            } else {
                tracing::debug!(signer = %address, epoch = epoch.id, "signature from address outside witness set");
            }
        }

        let got = signers.len() as u32;
        let need = epoch.minimum_witness_count;
        if got < need {
            tracing::debug!(epoch = epoch.id, got, need, "quorum not met");
            return Err(AttestError::QuorumNotMet { got, need });
        }

        tracing::debug!(
            epoch = epoch.id,
            claim = %claim.identifier,
            signers = got,
            "claim accepted"
        );
        Ok(Verdict {
            epoch: epoch.id,
            signers: signers.into_iter().collect(),
        })
    }
}
