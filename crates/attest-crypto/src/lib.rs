//! # Attest Crypto — Signature Recovery
//!
//! **Purpose**: Recover witness addresses from recoverable secp256k1
//! signatures, and produce such signatures on the witness side.
//!
//! The verifier never holds witness public keys: a witness is known only by
//! its 20-byte address, and every signature carries enough information to
//! recover the signer's key. Recovering an address that is not in the
//! witness set is a normal outcome handled by the caller, never an error
//! here.
//!
//! ## What's NOT in this crate
//!
//! - Witness set membership and quorum counting (belongs in
//!   `attest-registry`)
//! - Claim hashing (belongs in `attest-core`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Address derivation and witness-side signing
pub mod keys;

/// Signer recovery from (digest, signature) pairs
pub mod recover;

pub use keys::{address_from_verifying_key, sign_digest};
pub use recover::{Secp256k1Recoverer, SignatureRecoverer};
