//! # Attest Core — Foundation Types
//!
//! **Purpose**: Define the claim data model, canonical encoding, and the
//! unified error type for the witness attestation registry.
//!
//! This crate is pure domain logic: deterministic byte encoding, content
//! hashing, and typed identifiers. It performs no I/O, holds no mutable
//! state, and never parses the opaque provider payloads it hashes.
//!
//! ## Core Concepts
//!
//! - **Claim identifier**: a keccak-256 content hash binding a claim's
//!   signatures to the exact attested data description.
//! - **Canonical encoding**: a fixed-order, length-prefixed byte layout of
//!   claim fields, stable across hosts.
//! - **Witness address**: a 20-byte identity, compared byte-wise so address
//!   casing never matters.
//!
//! ## What's NOT in this crate
//!
//! - Signature recovery (belongs in `attest-crypto`)
//! - Epoch storage and quorum logic (belongs in `attest-registry`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Canonical claim encoding and digests
pub mod canonical;

/// Claim, signed-claim, and proof types
pub mod claim;

/// Unified error type for attestation operations
pub mod error;

/// Typed identifiers: witness addresses, claim ids, epoch ids
pub mod identifiers;

pub use canonical::{canonical_claim_bytes, claim_id, signing_digest};
pub use claim::{ClaimData, ClaimInfo, Proof, SignatureBytes, SignedClaim};
pub use error::{AttestError, AttestResult};
pub use identifiers::{ClaimId, EpochId, WitnessAddress};
