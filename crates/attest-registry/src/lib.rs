//! # Attest Registry — Epochs and Quorum Verification
//!
//! **Purpose**: Maintain the append-only history of witness epochs and
//! decide, for each submitted proof, whether a quorum of the referenced
//! epoch's witnesses signed the claim.
//!
//! The registry is the only mutable state in the system, and it only ever
//! grows: registering a new witness set creates a new epoch with the next
//! sequential id, so claims signed under an old witness set stay verifiable
//! after rotation. Verification itself is a pure decision function over the
//! epoch history and a single proof.
//!
//! ## Embedding
//!
//! [`EpochRegistry`] and [`ClaimVerifier`] are plain synchronous values for
//! single-threaded hosts. [`SharedEpochRegistry`] adds the single-writer,
//! multi-reader locking an in-process concurrent embedding needs, and
//! [`host`] speaks the JSON message shapes a chain-style host exchanges.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Witness and epoch records
pub mod epoch;

/// Host-facing message layer
pub mod host;

/// Verification policy hooks and the clock seam
pub mod policy;

/// Epoch registration API
pub mod registry;

/// Append-only epoch storage
pub mod store;

/// The claim verification protocol
pub mod verifier;

pub use epoch::{Epoch, Witness};
pub use host::{AttestationHost, Event, ExecuteMsg, ExecuteOutcome, QueryMsg};
pub use policy::{Clock, SystemClock, VerificationPolicy};
pub use registry::{EpochRegistry, SharedEpochRegistry};
pub use store::EpochStore;
pub use verifier::{ClaimVerifier, Verdict};
