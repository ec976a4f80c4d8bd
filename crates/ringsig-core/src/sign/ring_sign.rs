//! Schnorr ring signing

use crate::challenge::challenge;
use crate::group::{add, base_point_mul, random_scalar, scalar_mul};
use crate::{Error, PrivateKey, PublicKey, Result, Ring, Signature, MIN_RING_SIZE};
use k256::{ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};
use zeroize::Zeroizing;

/// Produce a ring signature over `message`.
///
/// With `r` the signer index and `R` the ring size:
/// 1. draw a nonce `k` and set `e(r+1) = H(m, k·G)`
/// 2. for each `i` from `r+1` around to `r-1`, draw `s(i)` and set
///    `e(i+1) = H(m, s(i)·G + e(i)·P(i))`
/// 3. close the ring with `s(r) = k - e(r)·x(r)`
///
/// The stored challenge is `e(0)`, the value verification starts from.
///
/// # Arguments
/// * `message` - Message bytes to sign
/// * `ring` - Ordered ring of public keys, at least two members
/// * `signer_index` - Position of the signer's public key in `ring`
/// * `private_key` - Private key matching `ring[signer_index]`
/// * `rng` - Cryptographically secure randomness source
///
/// # Errors
/// Precondition errors are returned before any nonce is drawn.
/// [`Error::Randomness`] aborts signing if the source fails.
#[instrument(skip_all, fields(ring_size = ring.len(), message_len = message.len()))]
pub fn sign<R>(
    message: &[u8],
    ring: &[PublicKey],
    signer_index: usize,
    private_key: &PrivateKey,
    rng: &mut R,
) -> Result<Signature>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let size = ring.len();
    if size < MIN_RING_SIZE {
        return Err(Error::RingTooSmall { size });
    }
    if signer_index >= size {
        return Err(Error::SignerIndexOutOfRange {
            index: signer_index,
            size,
        });
    }

    let x = Zeroizing::new(*private_key.scalar());
    let points: Vec<ProjectivePoint> = ring.iter().map(PublicKey::to_projective).collect();

    if !bool::from(base_point_mul(&x).ct_eq(&points[signer_index])) {
        return Err(Error::KeyMismatch {
            index: signer_index,
        });
    }

    let k = Zeroizing::new(*random_scalar(rng)?);

    let mut challenges = vec![Scalar::ZERO; size];
    let mut responses = vec![Scalar::ZERO; size];

    let start = (signer_index + 1) % size;
    challenges[start] = challenge(message, &base_point_mul(&k));

    // Simulated transcripts for every member except the signer
    for i in (start..start + size - 1).map(|i| i % size) {
        let s = *random_scalar(rng)?;
        let commitment = add(&base_point_mul(&s), &scalar_mul(&challenges[i], &points[i]));
        responses[i] = s;
        challenges[(i + 1) % size] = challenge(message, &commitment);
    }

    responses[signer_index] = *k - challenges[signer_index] * *x;

    debug!("Ring signature produced");

    Signature::new(Ring::from(ring), challenges[0], responses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{init_tracing, ring_of, seeded, FailingRng};
    use crate::verify;

    #[test]
    fn test_every_signer_position_verifies() {
        init_tracing();
        let mut rng = seeded(1);
        for size in 2..=5 {
            let (pairs, ring) = ring_of(size, &mut rng);
            for (index, kp) in pairs.iter().enumerate() {
                let sig = sign(b"position", &ring, index, &kp.private, &mut rng).unwrap();
                assert!(verify(b"position", &ring, &sig), "size {size} index {index}");
            }
        }
    }

    #[test]
    fn test_rejects_small_ring() {
        let mut rng = seeded(2);
        let (pairs, ring) = ring_of(1, &mut rng);

        let err = sign(b"m", &ring, 0, &pairs[0].private, &mut rng).unwrap_err();
        assert!(matches!(err, Error::RingTooSmall { size: 1 }));

        let err = sign(b"m", &[], 0, &pairs[0].private, &mut rng).unwrap_err();
        assert!(matches!(err, Error::RingTooSmall { size: 0 }));
    }

    #[test]
    fn test_rejects_index_out_of_range() {
        let mut rng = seeded(3);
        let (pairs, ring) = ring_of(3, &mut rng);

        let err = sign(b"m", &ring, 3, &pairs[0].private, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::SignerIndexOutOfRange { index: 3, size: 3 }
        ));
    }

    #[test]
    fn test_rejects_mismatched_key() {
        let mut rng = seeded(4);
        let (pairs, ring) = ring_of(3, &mut rng);

        let err = sign(b"m", &ring, 0, &pairs[1].private, &mut rng).unwrap_err();
        assert!(matches!(err, Error::KeyMismatch { index: 0 }));
        assert!(err.is_precondition());
    }

    #[test]
    fn test_preconditions_checked_before_randomness() {
        let mut rng = seeded(5);
        let (pairs, ring) = ring_of(2, &mut rng);

        let err = sign(b"m", &ring, 1, &pairs[0].private, &mut FailingRng).unwrap_err();
        assert!(matches!(err, Error::KeyMismatch { index: 1 }));
    }

    #[test]
    fn test_randomness_failure_aborts() {
        let mut rng = seeded(6);
        let (pairs, ring) = ring_of(3, &mut rng);

        let err = sign(b"m", &ring, 2, &pairs[2].private, &mut FailingRng).unwrap_err();
        assert!(matches!(err, Error::Randomness(_)));
    }

    #[test]
    fn test_fresh_randomness_gives_distinct_signatures() {
        let mut rng = seeded(7);
        let (pairs, ring) = ring_of(3, &mut rng);

        let a = sign(b"same", &ring, 1, &pairs[1].private, &mut rng).unwrap();
        let b = sign(b"same", &ring, 1, &pairs[1].private, &mut rng).unwrap();

        assert_ne!(a, b);
        assert!(verify(b"same", &ring, &a));
        assert!(verify(b"same", &ring, &b));
    }

    #[test]
    fn test_layout_independent_of_signer() {
        let mut rng = seeded(8);
        let (pairs, ring) = ring_of(4, &mut rng);

        let sigs: Vec<Signature> = pairs
            .iter()
            .enumerate()
            .map(|(i, kp)| sign(b"anon", &ring, i, &kp.private, &mut rng).unwrap())
            .collect();

        for sig in &sigs {
            assert_eq!(sig.ring(), &ring);
            assert_eq!(sig.responses().len(), ring.len());
            assert_eq!(sig.to_bytes().len(), sigs[0].to_bytes().len());
            assert!(sig.responses().iter().all(|s| !bool::from(s.is_zero())));
        }
    }

    #[test]
    fn test_default_source() {
        let mut rng = seeded(9);
        let (pairs, ring) = ring_of(2, &mut rng);

        let sig = super::super::sign_default(b"os", &ring, 0, &pairs[0].private).unwrap();
        assert!(sig.verify(b"os"));
    }
}
