//! Signer recovery from (digest, signature) pairs.

use attest_core::{AttestError, AttestResult, WitnessAddress};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use crate::keys::address_from_verifying_key;

/// Expected signature length: 64 bytes of `r || s` plus one recovery byte.
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Recovers the signer address from a digest and a recoverable signature.
///
/// Injected into the claim verifier so an alternate curve or address scheme
/// can be substituted without touching quorum logic.
pub trait SignatureRecoverer {
    /// Recover the address that produced `signature` over `digest`.
    ///
    /// Fails with [`AttestError::InvalidSignatureFormat`] when the bytes are
    /// not a well-formed recoverable signature, or
    /// [`AttestError::RecoveryFailed`] when curve recovery itself fails.
    fn recover(&self, digest: &[u8; 32], signature: &[u8]) -> AttestResult<WitnessAddress>;
}

/// Default recoverer: secp256k1 with keccak-derived 20-byte addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recoverer;

impl SignatureRecoverer for Secp256k1Recoverer {
    fn recover(&self, digest: &[u8; 32], signature: &[u8]) -> AttestResult<WitnessAddress> {
        let (sig, recovery_id) = split_signature(signature)?;
        let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id).map_err(|e| {
            AttestError::RecoveryFailed {
                reason: e.to_string(),
            }
        })?;
        Ok(address_from_verifying_key(&key))
    }
}

/// Split `r || s || v` bytes into a signature and a recovery id.
///
/// The recovery byte accepts both the raw 0/1 form and the Ethereum-style
/// 27/28 offset.
fn split_signature(bytes: &[u8]) -> AttestResult<(Signature, RecoveryId)> {
    if bytes.len() != RECOVERABLE_SIGNATURE_LEN {
        return Err(AttestError::InvalidSignatureFormat {
            reason: format!(
                "expected {RECOVERABLE_SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            ),
        });
    }

    let v = match bytes[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        other => {
            return Err(AttestError::InvalidSignatureFormat {
                reason: format!("recovery id {other} out of range"),
            })
        }
    };
    let recovery_id = RecoveryId::from_byte(v).ok_or_else(|| AttestError::InvalidSignatureFormat {
        reason: format!("recovery id {v} out of range"),
    })?;

    let sig = Signature::from_slice(&bytes[..64]).map_err(|e| AttestError::InvalidSignatureFormat {
        reason: format!("malformed r/s component: {e}"),
    })?;

    Ok((sig, recovery_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{sign_digest, test_signing_key};

    #[test]
    fn test_recover_round_trip() {
        let key = test_signing_key(7);
        let expected = address_from_verifying_key(key.verifying_key());

        let digest = [0x42u8; 32];
        let signature = sign_digest(&key, &digest).unwrap();

        let recovered = Secp256k1Recoverer.recover(&digest, &signature).unwrap();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn test_recover_accepts_ethereum_style_recovery_byte() {
        let key = test_signing_key(7);
        let expected = address_from_verifying_key(key.verifying_key());

        let digest = [0x42u8; 32];
        let mut signature = sign_digest(&key, &digest).unwrap();
        signature[64] += 27;

        let recovered = Secp256k1Recoverer.recover(&digest, &signature).unwrap();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn test_flipped_recovery_id_yields_different_address() {
        let key = test_signing_key(9);
        let expected = address_from_verifying_key(key.verifying_key());

        let digest = [0x13u8; 32];
        let mut signature = sign_digest(&key, &digest).unwrap();
        signature[64] ^= 1;

        // Either recovery fails outright or it lands on a different point;
        // both are rejections from the caller's point of view.
        match Secp256k1Recoverer.recover(&digest, &signature) {
            Ok(addr) => assert_ne!(addr, expected),
            Err(AttestError::RecoveryFailed { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_length_is_invalid_format() {
        let err = Secp256k1Recoverer
            .recover(&[0u8; 32], &[0u8; 64])
            .unwrap_err();
        assert!(matches!(err, AttestError::InvalidSignatureFormat { .. }));
    }

    #[test]
    fn test_recovery_byte_out_of_range_is_invalid_format() {
        let key = test_signing_key(3);
        let digest = [0x07u8; 32];
        let mut signature = sign_digest(&key, &digest).unwrap();
        signature[64] = 5;

        let err = Secp256k1Recoverer.recover(&digest, &signature).unwrap_err();
        assert!(matches!(err, AttestError::InvalidSignatureFormat { .. }));
    }

    #[test]
    fn test_zero_scalar_signature_is_invalid_format() {
        // r = s = 0 is rejected before any curve work happens.
        let err = Secp256k1Recoverer
            .recover(&[0u8; 32], &[0u8; 65])
            .unwrap_err();
        assert!(matches!(err, AttestError::InvalidSignatureFormat { .. }));
    }
}
