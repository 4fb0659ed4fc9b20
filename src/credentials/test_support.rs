//! Shared helpers for credential unit tests.

use rand::{CryptoRng, RngCore};

/// CSPRNG stand-in whose every fill fails, like an exhausted OS source.
pub(crate) struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {}

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy exhausted"))
    }
}

impl CryptoRng for FailingRng {}
