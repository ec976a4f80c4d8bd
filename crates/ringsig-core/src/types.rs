//! Core types for ring signatures

use crate::group::{self, POINT_LEN, SCALAR_LEN, UNCOMPRESSED_POINT_LEN};
use crate::{Error, Result};
use elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, ProjectivePoint, Scalar, SecretKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Public key: a secp256k1 point other than the identity
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(k256::PublicKey);

impl PublicKey {
    /// Decode a SEC1 point (compressed or uncompressed)
    ///
    /// Only the `0x02`/`0x03` compressed and `0x04` uncompressed forms are
    /// accepted, so each key has exactly one compressed spelling.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match (bytes.first(), bytes.len()) {
            (Some(0x02 | 0x03), POINT_LEN) | (Some(0x04), UNCOMPRESSED_POINT_LEN) => {}
            _ => return Err(Error::Encoding("unsupported public key encoding".into())),
        }

        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| Error::Encoding("invalid public key point".into()))
    }

    /// Canonical compressed SEC1 encoding
    pub fn to_bytes(&self) -> [u8; POINT_LEN] {
        let mut bytes = [0u8; POINT_LEN];
        bytes.copy_from_slice(self.0.to_encoded_point(true).as_bytes());
        bytes
    }

    /// Decode from a hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| Error::Encoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Hex of the compressed encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The underlying group element
    pub fn to_projective(&self) -> ProjectivePoint {
        self.0.to_projective()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Private key: a non-zero scalar, wiped from memory on drop
#[derive(Clone)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    pub(crate) fn from_scalar(scalar: NonZeroScalar) -> Self {
        Self(SecretKey::from(scalar))
    }

    /// Decode a 32-byte big-endian scalar in `[1, n-1]`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SCALAR_LEN {
            return Err(Error::Encoding(format!(
                "private key must be {} bytes, got {}",
                SCALAR_LEN,
                bytes.len()
            )));
        }
        SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| Error::Encoding("private key out of range".into()))
    }

    /// 32-byte big-endian encoding
    pub fn to_bytes(&self) -> [u8; SCALAR_LEN] {
        self.0.to_bytes().into()
    }

    /// The matching public key `x·G`
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }

    pub(crate) fn scalar(&self) -> NonZeroScalar {
        self.0.to_nonzero_scalar()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// A public key together with its private key
#[derive(Clone, Debug)]
pub struct KeyPair {
    /// Shareable half
    pub public: PublicKey,
    /// Secret half, never transmitted
    pub private: PrivateKey,
}

/// Ordered list of public keys. Index order is part of the signature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<PublicKey>);

impl Ring {
    /// Create a ring from keys in the given order
    pub fn new(keys: Vec<PublicKey>) -> Self {
        Self(keys)
    }

    /// Index of the given key, if it is a member
    pub fn position(&self, key: &PublicKey) -> Option<usize> {
        self.0.iter().position(|k| k == key)
    }

    /// Consume the ring, returning its keys
    pub fn into_inner(self) -> Vec<PublicKey> {
        self.0
    }
}

impl Deref for Ring {
    type Target = [PublicKey];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<PublicKey>> for Ring {
    fn from(keys: Vec<PublicKey>) -> Self {
        Self(keys)
    }
}

impl From<&[PublicKey]> for Ring {
    fn from(keys: &[PublicKey]) -> Self {
        Self(keys.to_vec())
    }
}

impl FromIterator<PublicKey> for Ring {
    fn from_iter<I: IntoIterator<Item = PublicKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ring signature: the ring, the challenge entering index 0, and one
/// response per ring member.
///
/// Nothing in a signature identifies the signing member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    ring: Ring,
    #[serde(with = "scalar_hex")]
    e: Scalar,
    #[serde(with = "scalar_hex::seq")]
    s: Vec<Scalar>,
}

impl Signature {
    /// Assemble a signature, checking that there is one response per ring member
    pub fn new(ring: Ring, e: Scalar, s: Vec<Scalar>) -> Result<Self> {
        if ring.len() < crate::MIN_RING_SIZE {
            return Err(Error::RingTooSmall { size: ring.len() });
        }
        if s.len() != ring.len() {
            return Err(Error::LengthMismatch {
                ring: ring.len(),
                responses: s.len(),
            });
        }
        Ok(Self { ring, e, s })
    }

    /// Assemble a signature from its parts without checking lengths
    pub fn from_parts(ring: Ring, e: Scalar, s: Vec<Scalar>) -> Self {
        Self { ring, e, s }
    }

    /// Split the signature into `(ring, e, s)`
    pub fn into_parts(self) -> (Ring, Scalar, Vec<Scalar>) {
        (self.ring, self.e, self.s)
    }

    /// The ring this signature was produced over
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Stored closing challenge `e(0)`
    pub fn challenge(&self) -> &Scalar {
        &self.e
    }

    /// Responses `s(0)..s(R-1)`
    pub fn responses(&self) -> &[Scalar] {
        &self.s
    }

    /// Verify against the ring embedded in the signature
    pub fn verify(&self, message: &[u8]) -> bool {
        crate::verify(message, &self.ring, self)
    }

    /// Pretty-printed JSON form: hex keys, hex `e`, hex responses
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the JSON form. Keys and scalars decode strictly; lengths are
    /// left for [`verify`](crate::verify) to reject.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Canonical byte form:
    /// `be_u32(R) || R keys (33 bytes each) || e (32 bytes) || R responses (32 bytes each)`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            4 + self.ring.len() * POINT_LEN + (1 + self.s.len()) * SCALAR_LEN,
        );
        bytes.extend_from_slice(&(self.ring.len() as u32).to_be_bytes());
        for key in self.ring.iter() {
            bytes.extend_from_slice(&key.to_bytes());
        }
        bytes.extend_from_slice(&group::encode_scalar(&self.e));
        for s in &self.s {
            bytes.extend_from_slice(&group::encode_scalar(s));
        }
        bytes
    }

    /// Parse the canonical byte form, rejecting truncated or trailing input
    /// and rings below the minimum size
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header: [u8; 4] = bytes
            .get(..4)
            .and_then(|h| h.try_into().ok())
            .ok_or_else(|| Error::Encoding("signature too short".into()))?;
        let size = u32::from_be_bytes(header) as usize;

        let expected = size
            .checked_mul(POINT_LEN + SCALAR_LEN)
            .and_then(|n| n.checked_add(4 + SCALAR_LEN))
            .ok_or_else(|| Error::Encoding("ring size overflow".into()))?;
        if bytes.len() != expected {
            return Err(Error::Encoding(format!(
                "signature for ring of {} must be {} bytes, got {}",
                size,
                expected,
                bytes.len()
            )));
        }

        let (keys, rest) = bytes[4..].split_at(size * POINT_LEN);
        let ring = keys
            .chunks_exact(POINT_LEN)
            .map(PublicKey::from_bytes)
            .collect::<Result<Ring>>()?;

        let (e, responses) = rest.split_at(SCALAR_LEN);
        let e = group::decode_scalar(e)?;
        let s = responses
            .chunks_exact(SCALAR_LEN)
            .map(group::decode_scalar)
            .collect::<Result<Vec<_>>>()?;

        Self::new(ring, e, s)
    }
}

/// Hex serde for scalars; decoding rejects non-canonical values
mod scalar_hex {
    use crate::group::{decode_scalar, encode_scalar};
    use k256::Scalar;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(scalar: &Scalar, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(encode_scalar(scalar)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Scalar, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse::<D::Error>(&s)
    }

    fn parse<E: serde::de::Error>(s: &str) -> Result<Scalar, E> {
        let bytes = hex::decode(s).map_err(E::custom)?;
        decode_scalar(&bytes).map_err(E::custom)
    }

    pub mod seq {
        use k256::Scalar;
        use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(scalars: &[Scalar], serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(scalars.len()))?;
            for scalar in scalars {
                seq.serialize_element(&hex::encode(super::encode_scalar(scalar)))?;
            }
            seq.end()
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Scalar>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Vec::<String>::deserialize(deserializer)?
                .iter()
                .map(|s| super::parse::<D::Error>(s))
                .collect()
        }
    }
}
