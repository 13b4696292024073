//! Typed identifiers used throughout the attestation registry.
//!
//! Addresses and claim ids travel as `0x`-prefixed hex strings on the wire
//! but are held as fixed-size byte arrays internally, so equality and set
//! membership are byte-wise and insensitive to hex casing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AttestError;

/// Sequential epoch identifier, assigned from 1 upward.
pub type EpochId = u64;

/// 20-byte witness (or claim owner) identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WitnessAddress([u8; 20]);

/// 32-byte claim content hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId([u8; 32]);

impl WitnessAddress {
    /// Create an address from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl ClaimId {
    /// Raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for ClaimId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

fn decode_fixed_hex(s: &str, out: &mut [u8], what: &str) -> Result<(), AttestError> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if digits.len() != out.len() * 2 {
        return Err(AttestError::MalformedMessage {
            reason: format!(
                "{what} must be {} hex chars, got {}",
                out.len() * 2,
                digits.len()
            ),
        });
    }
    hex::decode_to_slice(digits, out).map_err(|e| AttestError::MalformedMessage {
        reason: format!("{what} is not valid hex: {e}"),
    })
}

impl FromStr for WitnessAddress {
    type Err = AttestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 20];
        decode_fixed_hex(s, &mut bytes, "witness address")?;
        Ok(Self(bytes))
    }
}

impl FromStr for ClaimId {
    type Err = AttestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        decode_fixed_hex(s, &mut bytes, "claim identifier")?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for WitnessAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for WitnessAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WitnessAddress({self})")
    }
}

impl fmt::Debug for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimId({self})")
    }
}

impl Serialize for WitnessAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WitnessAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for ClaimId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClaimId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_is_case_insensitive() {
        let lower: WitnessAddress = "0x244897572368eadf65bfbc5aec98d8e5443a9072"
            .parse()
            .unwrap();
        let upper: WitnessAddress = "0x244897572368EADF65BFBC5AEC98D8E5443A9072"
            .parse()
            .unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_address_parse_without_prefix() {
        let with: WitnessAddress = "0x244897572368eadf65bfbc5aec98d8e5443a9072"
            .parse()
            .unwrap();
        let without: WitnessAddress = "244897572368eadf65bfbc5aec98d8e5443a9072"
            .parse()
            .unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_address_displays_lowercase() {
        let addr: WitnessAddress = "0x244897572368EADF65BFBC5AEC98D8E5443A9072"
            .parse()
            .unwrap();
        assert_eq!(addr.to_string(), "0x244897572368eadf65bfbc5aec98d8e5443a9072");
    }

    #[test]
    fn test_address_rejects_bad_length_and_bad_hex() {
        assert!("0x1234".parse::<WitnessAddress>().is_err());
        assert!("0xzz4897572368eadf65bfbc5aec98d8e5443a9072"
            .parse::<WitnessAddress>()
            .is_err());
    }

    #[test]
    fn test_claim_id_json_round_trip() {
        let id: ClaimId = "0x5fba1c86439db035389d90f8025739c54849db4cfb7cf91aa3fb02abd9c1f83a"
            .parse()
            .unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(
            json,
            "\"0x5fba1c86439db035389d90f8025739c54849db4cfb7cf91aa3fb02abd9c1f83a\""
        );
        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
