//! Test doubles and fixtures

use crate::keygen::generate;
use crate::{KeyPair, Ring};
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

/// Randomness source that always fails
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy source exhausted")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy source exhausted")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy source exhausted")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let code = core::num::NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
        Err(rand_core::Error::from(code))
    }
}

impl CryptoRng for FailingRng {}

/// Deterministic source for reproducible tests
pub fn seeded(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// `size` fresh key pairs and the ring of their public keys, in order
pub fn ring_of(size: usize, rng: &mut ChaCha20Rng) -> (Vec<KeyPair>, Ring) {
    let pairs: Vec<KeyPair> = (0..size).map(|_| generate(rng).unwrap()).collect();
    let ring = pairs.iter().map(|kp| kp.public.clone()).collect();
    (pairs, ring)
}

/// Route library logs to the test harness; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
