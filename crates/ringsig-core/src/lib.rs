//! # Ring Signatures Core
//!
//! Schnorr-style ring signatures over secp256k1.
//!
//! A ring signature proves that *some* member of an ordered set of public
//! keys (the ring) signed a message, without revealing which one.
//!
//! This crate provides:
//! - Key generation
//! - Ring signing
//! - Ring verification
//!
//! ## Protocol Overview
//!
//! With ring `P(0)..P(R-1)` and signer `r` holding `x(r)`:
//! - the signer commits to a nonce `k` and starts the challenge chain at `r+1`
//! - every other member gets a simulated response `s(i)` and the chain
//!   advances with `e(i+1) = H(m, s(i)·G + e(i)·P(i))`
//! - the signer closes the chain with `s(r) = k - e(r)·x(r)`
//!
//! The signature is `(ring, e(0), s(0)..s(R-1))`. Verification replays the
//! chain from `e(0)` and checks that it closes.
//!
//! ## Example
//!
//! ```rust
//! use ringsig_core::{keygen, sign, verify, Ring};
//!
//! let alice = keygen::generate_default()?;
//! let bob = keygen::generate_default()?;
//! let carol = keygen::generate_default()?;
//!
//! let ring = Ring::new(vec![alice.public, bob.public.clone(), carol.public]);
//! let signature = sign::sign_default(b"hello", &ring, 1, &bob.private)?;
//!
//! assert!(verify(b"hello", &ring, &signature));
//! assert!(!verify(b"goodbye", &ring, &signature));
//! # Ok::<(), ringsig_core::Error>(())
//! ```

pub mod challenge;
pub mod error;
pub mod group;
pub mod keygen;
pub mod sign;
pub mod types;
mod verify;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use types::{KeyPair, PrivateKey, PublicKey, Ring, Signature};
pub use verify::verify;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest ring that provides any anonymity
pub const MIN_RING_SIZE: usize = 2;
