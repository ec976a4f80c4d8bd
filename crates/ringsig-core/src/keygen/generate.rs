//! Key pair generation

use crate::group::random_scalar;
use crate::{KeyPair, PrivateKey, Result};
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument};

/// Generate a key pair `(x·G, x)` with `x` uniform in `[1, n-1]`.
///
/// # Arguments
/// * `rng` - Cryptographically secure randomness source
///
/// # Returns
/// The new key pair, or [`crate::Error::Randomness`] if the source failed
#[instrument(skip_all)]
pub fn generate<R>(rng: &mut R) -> Result<KeyPair>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let private = PrivateKey::from_scalar(random_scalar(rng)?);
    let public = private.public_key();

    debug!(public_key = %public.to_hex(), "Generated key pair");

    Ok(KeyPair { public, private })
}
