//! Raw remember-token generation.

use super::error::Result;
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use secrecy::SecretString;

/// Random bytes behind each token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Length of the encoded token.
pub const TOKEN_LEN: usize = 43;

/// Create a new remember token from the OS random source.
///
/// The raw value is only returned to the caller for delivery to the client;
/// only its digest is ever stored.
///
/// # Errors
///
/// Returns [`super::Error::RandomSource`] if the OS random source fails.
pub fn new_token() -> Result<SecretString> {
    TokenGenerator::new(OsRng).generate()
}

/// Token generator over any cryptographically secure RNG.
#[derive(Debug)]
pub struct TokenGenerator<R> {
    rng: R,
}

impl<R: RngCore + CryptoRng> TokenGenerator<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Produce one unpadded base64url token.
    ///
    /// # Errors
    ///
    /// Returns [`super::Error::RandomSource`] if the RNG fails to fill.
    pub fn generate(&mut self) -> Result<SecretString> {
        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng.try_fill_bytes(&mut bytes)?;
        Ok(SecretString::from(Base64UrlUnpadded::encode_string(&bytes)))
    }
}
