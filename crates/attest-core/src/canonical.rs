//! Canonical claim encoding and digests.
//!
//! Two hashes anchor the protocol: the claim identifier, computed over the
//! canonicalized claim info, and the signing digest, computed over the
//! claim fields each witness signs. Both use keccak-256 so that recovered
//! secp256k1 signers map onto the same 20-byte address space the witness
//! registry stores. Identifier computation and signature digesting must use
//! the same primitive; changing one without the other breaks every
//! previously issued claim.

use sha3::{Digest, Keccak256};

use crate::claim::{ClaimData, ClaimInfo};
use crate::identifiers::ClaimId;

/// Deterministically serialize claim info for hashing.
///
/// Fixed field order (provider, parameters, context), each field prefixed
/// with its u32 big-endian byte length. The framing keeps the encoding
/// injective: shifting bytes between adjacent fields always changes the
/// output. Opaque fields pass through as raw bytes, never parsed.
pub fn canonical_claim_bytes(info: &ClaimInfo) -> Vec<u8> {
    let fields = [&info.provider, &info.parameters, &info.context];
    let total: usize = fields.iter().map(|f| 4 + f.len()).sum();
    let mut out = Vec::with_capacity(total);
    for field in fields {
        out.extend_from_slice(&(field.len() as u32).to_be_bytes());
        out.extend_from_slice(field.as_bytes());
    }
    out
}

/// Compute the claim identifier: keccak-256 of the canonical encoding.
pub fn claim_id(info: &ClaimInfo) -> ClaimId {
    ClaimId::from(keccak256(&canonical_claim_bytes(info)))
}

/// Compute the digest witnesses sign: keccak-256 over identifier, owner,
/// epoch, and timestamp in fixed order.
pub fn signing_digest(claim: &ClaimData) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(claim.identifier.as_bytes());
    hasher.update(claim.owner.as_bytes());
    hasher.update(claim.epoch.to_be_bytes());
    hasher.update(claim.timestamp_s.to_be_bytes());
    hasher.finalize().into()
}

fn keccak256(bytes: &[u8]) -> [u8; 32] {
    Keccak256::digest(bytes).into()
}
