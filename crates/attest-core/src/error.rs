//! Unified error type for the attestation registry.
//!
//! Every failure here is a terminal, non-retryable decision about a single
//! input. The variants are deliberately distinct so callers can tell a
//! malformed proof from an insufficient quorum from an unknown epoch, since
//! each requires different remediation.

use crate::identifiers::{ClaimId, EpochId};

/// Errors produced by epoch registration and claim verification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
pub enum AttestError {
    /// Epoch registration input failed validation
    #[error("invalid epoch config: {reason}")]
    InvalidEpochConfig {
        /// Which validation rule was violated
        reason: String,
    },

    /// The referenced epoch id was never assigned
    #[error("epoch {id} not found")]
    EpochNotFound {
        /// The epoch id the claim referenced
        id: EpochId,
    },

    /// The epoch store is empty
    #[error("no epochs registered")]
    NoEpochsRegistered,

    /// Recomputed claim identifier does not match the claimed one
    #[error("claim identifier mismatch: computed {expected}, claimed {claimed}")]
    IdentifierMismatch {
        /// Identifier recomputed from the submitted claim info
        expected: ClaimId,
        /// Identifier carried inside the signed claim
        claimed: ClaimId,
    },

    /// A signature is not a well-formed 65-byte recoverable signature
    #[error("invalid signature format: {reason}")]
    InvalidSignatureFormat {
        /// What was wrong with the signature bytes
        reason: String,
    },

    /// Curve recovery failed on a structurally valid signature
    #[error("signature recovery failed: {reason}")]
    RecoveryFailed {
        /// Underlying recovery failure
        reason: String,
    },

    /// Fewer distinct witnesses signed than the epoch's quorum requires
    #[error("quorum not met: {got} of {need} required witness signatures")]
    QuorumNotMet {
        /// Distinct valid witness signers found
        got: u32,
        /// Minimum witness count for the epoch
        need: u32,
    },

    /// Claim is older than the host's configured maximum age
    #[error("claim expired: age {age_s}s exceeds maximum {max_age_s}s")]
    ClaimExpired {
        /// Seconds elapsed since the claim timestamp
        age_s: u64,
        /// Configured maximum claim age in seconds
        max_age_s: u64,
    },

    /// Claim references a past epoch while the host requires the current one
    #[error("claim references stale epoch {claimed}, current epoch is {current}")]
    StaleEpoch {
        /// Epoch id the claim was signed under
        claimed: EpochId,
        /// Highest registered epoch id
        current: EpochId,
    },

    /// Sender is not allowed to perform this operation
    #[error("unauthorized: sender is not the registry owner")]
    Unauthorized,

    /// A host-boundary message could not be decoded
    #[error("malformed message: {reason}")]
    MalformedMessage {
        /// What failed to parse
        reason: String,
    },
}

impl AttestError {
    /// Create an epoch-config validation error.
    pub fn invalid_epoch_config(reason: impl Into<String>) -> Self {
        Self::InvalidEpochConfig {
            reason: reason.into(),
        }
    }

    /// Create a malformed-message error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMessage {
            reason: reason.into(),
        }
    }
}

/// Result alias for attestation operations.
pub type AttestResult<T> = Result<T, AttestError>;
