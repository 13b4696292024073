//! Address derivation and witness-side signing.
//!
//! Witness addresses are the last 20 bytes of the keccak-256 hash of the
//! uncompressed public key (tag byte dropped), so recovered signers land in
//! the same address space the epoch registry stores.

use attest_core::{AttestError, AttestResult, WitnessAddress};
use k256::ecdsa::{SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

/// Derive the 20-byte address for a secp256k1 verifying key.
pub fn address_from_verifying_key(key: &VerifyingKey) -> WitnessAddress {
    let point = key.to_encoded_point(false);
    let digest = Keccak256::digest(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    WitnessAddress::from_bytes(address)
}

/// Produce a 65-byte `r || s || v` recoverable signature over a prehashed
/// digest. This is the witness side of the protocol; verifiers only ever
/// call [`crate::SignatureRecoverer`].
pub fn sign_digest(key: &SigningKey, digest: &[u8; 32]) -> AttestResult<[u8; 65]> {
    let (sig, recovery_id) = key
        .sign_prehash_recoverable(digest)
        .map_err(|e| AttestError::RecoveryFailed {
            reason: format!("prehash signing failed: {e}"),
        })?;

    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&sig.to_bytes());
    out[64] = recovery_id.to_byte();
    Ok(out)
}

/// Deterministic signing key for tests. `seed` must be nonzero.
#[cfg(test)]
pub(crate) fn test_signing_key(seed: u8) -> SigningKey {
    SigningKey::from_slice(&[seed; 32]).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_derivation_is_stable() {
        let key = test_signing_key(1);
        let a = address_from_verifying_key(key.verifying_key());
        let b = address_from_verifying_key(key.verifying_key());
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_keys_get_distinct_addresses() {
        let a = address_from_verifying_key(test_signing_key(1).verifying_key());
        let b = address_from_verifying_key(test_signing_key(2).verifying_key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_known_key_address_vector() {
        // Private key 0x01..01 has a well-known Ethereum-style address.
        let key = SigningKey::from_slice(&hex::decode(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap())
        .unwrap();
        let address = address_from_verifying_key(key.verifying_key());
        assert_eq!(
            address.to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_signature_layout() {
        let key = test_signing_key(5);
        let signature = sign_digest(&key, &[0xaa; 32]).unwrap();
        assert_eq!(signature.len(), 65);
        assert!(signature[64] <= 1);
    }
}
