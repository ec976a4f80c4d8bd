//! Challenge function `H(message, point) -> scalar`

use crate::group::{encode_point, reduce_mod_order};
use digest::Digest;
use k256::{ProjectivePoint, Scalar};
use sha2::Sha256;

/// Domain separation tag prefixed to every challenge hash
pub const CHALLENGE_DOMAIN: &[u8] = b"ringsig/schnorr-ring/challenge/v1";

/// Hash a message and a commitment point to a scalar modulo the group order.
///
/// Computes `SHA-256(tag || len(message) || message || SEC1(point))` and
/// reduces the big-endian digest modulo `n`. The message length is encoded
/// as a big-endian `u64` so the message/point boundary is unambiguous.
pub fn challenge(message: &[u8], point: &ProjectivePoint) -> Scalar {
    let encoded = encode_point(point);

    let digest = Sha256::new()
        .chain_update(CHALLENGE_DOMAIN)
        .chain_update((message.len() as u64).to_be_bytes())
        .chain_update(message)
        .chain_update(encoded.as_bytes())
        .finalize();

    reduce_mod_order(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::base_point_mul;

    #[test]
    fn test_deterministic() {
        let point = base_point_mul(&Scalar::from(5u64));
        assert_eq!(challenge(b"hello", &point), challenge(b"hello", &point));
    }

    #[test]
    fn test_binds_message_and_point() {
        let p = base_point_mul(&Scalar::from(5u64));
        let q = base_point_mul(&Scalar::from(6u64));

        assert_ne!(challenge(b"hello", &p), challenge(b"hellp", &p));
        assert_ne!(challenge(b"hello", &p), challenge(b"hello", &q));
    }

    #[test]
    fn test_length_prefix_separates_message_from_point() {
        // Moving bytes between message and point must not collide
        let p = ProjectivePoint::IDENTITY;
        assert_ne!(challenge(b"", &p), challenge(&[0x00], &p));
    }

    #[test]
    fn test_matches_manual_construction() {
        let point = ProjectivePoint::GENERATOR;
        let mut preimage = CHALLENGE_DOMAIN.to_vec();
        preimage.extend_from_slice(&3u64.to_be_bytes());
        preimage.extend_from_slice(b"abc");
        preimage.extend_from_slice(encode_point(&point).as_bytes());

        let digest = Sha256::digest(&preimage);
        assert_eq!(challenge(b"abc", &point), reduce_mod_order(&digest));
    }
}
