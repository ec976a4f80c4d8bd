//! Key generation module
//!
//! Produces independent key pairs from a caller-supplied randomness source.
//! [`generate_default`] is the only place the process-wide OS source is
//! reached for implicitly.

mod generate;

pub use generate::generate;

use crate::{KeyPair, Result};
use rand::rngs::OsRng;

/// Generate a key pair from the operating system's secure randomness source.
///
/// Failure of the OS source is returned as [`crate::Error::Randomness`]
/// rather than aborting the process; callers with no recovery path may
/// treat it as fatal.
pub fn generate_default() -> Result<KeyPair> {
    generate(&mut OsRng)
}
