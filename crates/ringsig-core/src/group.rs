//! Group arithmetic over secp256k1
//!
//! Thin adapter over `k256` exposing exactly the operations the ring
//! signature protocol needs. Scalar multiplication in `k256` runs in constant
//! time, so private keys and nonces may be passed to [`base_point_mul`] and
//! [`scalar_mul`] directly.

use crate::{Error, Result};
use elliptic_curve::{bigint::U256, ops::Reduce, sec1::ToEncodedPoint, PrimeField};
use k256::{EncodedPoint, FieldBytes, NonZeroScalar, ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Length of a compressed SEC1 point
pub const POINT_LEN: usize = 33;

/// Length of an uncompressed SEC1 point
pub const UNCOMPRESSED_POINT_LEN: usize = 65;

/// Length of a big-endian scalar
pub const SCALAR_LEN: usize = 32;

/// Compute `k·G`
pub fn base_point_mul(k: &Scalar) -> ProjectivePoint {
    ProjectivePoint::GENERATOR * k
}

/// Compute `k·P`
pub fn scalar_mul(k: &Scalar, point: &ProjectivePoint) -> ProjectivePoint {
    point * k
}

/// Compute `P + Q`
pub fn add(p: &ProjectivePoint, q: &ProjectivePoint) -> ProjectivePoint {
    p + q
}

/// Canonical encoding of a point: compressed SEC1, or `[0x00]` for the identity
pub fn encode_point(point: &ProjectivePoint) -> EncodedPoint {
    point.to_affine().to_encoded_point(true)
}

/// Interpret 32 bytes as a big-endian integer and reduce it modulo `n`
pub fn reduce_mod_order(bytes: &FieldBytes) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(bytes)
}

/// Decode a canonical big-endian scalar, rejecting values `>= n`
pub fn decode_scalar(bytes: &[u8]) -> Result<Scalar> {
    let array: [u8; SCALAR_LEN] = bytes.try_into().map_err(|_| {
        Error::Encoding(format!(
            "scalar must be {} bytes, got {}",
            SCALAR_LEN,
            bytes.len()
        ))
    })?;

    Option::<Scalar>::from(Scalar::from_repr(array.into()))
        .ok_or_else(|| Error::Encoding("scalar is not reduced modulo the group order".into()))
}

/// Encode a scalar as 32 big-endian bytes
pub fn encode_scalar(scalar: &Scalar) -> [u8; SCALAR_LEN] {
    scalar.to_bytes().into()
}

/// Draw a uniformly random scalar in `[1, n-1]`
///
/// Candidates are rejection-sampled from the source so the result is uniform.
/// A source that fails to fill the buffer aborts with [`Error::Randomness`];
/// nothing weaker is substituted.
pub fn random_scalar<R>(rng: &mut R) -> Result<NonZeroScalar>
where
    R: RngCore + CryptoRng + ?Sized,
{
    // Wiped on every exit, including a failed fill after rejected candidates
    let mut bytes = Zeroizing::new([0u8; SCALAR_LEN]);

    loop {
        rng.try_fill_bytes(bytes.as_mut_slice())
            .map_err(|e| Error::Randomness(e.to_string()))?;

        let candidate = Option::<NonZeroScalar>::from(NonZeroScalar::from_repr((*bytes).into()));
        if let Some(scalar) = candidate {
            return Ok(scalar);
        }
    }
}
