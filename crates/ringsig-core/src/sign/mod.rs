//! Ring signature generation module
//!
//! The signer simulates a transcript for every ring member but itself, then
//! closes the ring with its private key so the challenge recursion returns
//! to where it started.

mod ring_sign;

pub use ring_sign::sign;

use crate::{PrivateKey, PublicKey, Result, Signature};
use rand::rngs::OsRng;

/// Sign using the operating system's secure randomness source
pub fn sign_default(
    message: &[u8],
    ring: &[PublicKey],
    signer_index: usize,
    private_key: &PrivateKey,
) -> Result<Signature> {
    sign(message, ring, signer_index, private_key, &mut OsRng)
}
