//! Claim, signed-claim, and proof types.
//!
//! Field names follow the wire shapes the attestation producers emit:
//! `claimInfo`, `signedClaim`, and `timestampS` keep their camelCase
//! spelling, everything else is snake_case.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::identifiers::{ClaimId, EpochId, WitnessAddress};

/// Description of the attested data: which provider produced it and the
/// opaque request/extraction payloads.
///
/// `parameters` and `context` are owned by the attestation-generation side.
/// This core treats them as byte blobs and never parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimInfo {
    /// Provider identifier, e.g. "http"
    pub provider: String,
    /// Opaque provider-defined request description
    pub parameters: String,
    /// Opaque JSON-encoded extracted-parameter map
    pub context: String,
}

/// The semantic fields every witness signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimData {
    /// Content hash of the canonicalized claim info
    pub identifier: ClaimId,
    /// Address of the claim owner
    pub owner: WitnessAddress,
    /// Epoch the claim was signed under
    pub epoch: EpochId,
    /// Claim creation time, seconds since the Unix epoch
    #[serde(rename = "timestampS")]
    pub timestamp_s: u64,
}

/// A claim plus the witness signatures over its signing digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedClaim {
    /// The signed claim fields
    pub claim: ClaimData,
    /// One 65-byte recoverable signature per witness
    pub signatures: Vec<SignatureBytes>,
}

/// The bundle submitted for a single verification call. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Description of the attested data
    #[serde(rename = "claimInfo")]
    pub claim_info: ClaimInfo,
    /// The co-signed claim
    #[serde(rename = "signedClaim")]
    pub signed_claim: SignedClaim,
}

/// Raw signature bytes, hex-encoded with a `0x` prefix on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureBytes(Vec<u8>);

impl SignatureBytes {
    /// Wrap raw signature bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 65]> for SignatureBytes {
    fn from(bytes: [u8; 65]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for SignatureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureBytes(0x{})", hex::encode(&self.0))
    }
}

impl Serialize for SignatureBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for SignatureBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(&s);
        let bytes = hex::decode(digits).map_err(serde::de::Error::custom)?;
        Ok(Self(bytes))
    }
}
