//! Ring signature verification

use crate::challenge::challenge;
use crate::group::{add, base_point_mul, scalar_mul};
use crate::{PublicKey, Signature, MIN_RING_SIZE};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};

/// Verify a ring signature against `ring`, in the given order.
///
/// Starting from the stored challenge `ee = e`, recomputes
/// `ee = H(m, s(i)·G + ee·P(i))` for `i = 0..R-1` and accepts iff the
/// recursion closes back on `e`. A ring smaller than two members, or a
/// response count that differs from the ring size, is rejected.
///
/// The ring embedded in `signature` is not consulted; see
/// [`Signature::verify`] for that. Returns only valid/invalid, never which
/// step diverged.
#[instrument(skip_all, fields(ring_size = ring.len(), message_len = message.len()))]
pub fn verify(message: &[u8], ring: &[PublicKey], signature: &Signature) -> bool {
    let responses = signature.responses();
    if ring.len() < MIN_RING_SIZE || responses.len() != ring.len() {
        debug!("Signature rejected: malformed");
        return false;
    }

    let e = signature.challenge();
    let ee = ring
        .iter()
        .zip(responses)
        .fold(*e, |ee, (key, s)| {
            let commitment = add(&base_point_mul(s), &scalar_mul(&ee, &key.to_projective()));
            challenge(message, &commitment)
        });

    let valid = bool::from(ee.ct_eq(e));
    debug!(valid, "Signature verified");
    valid
}
