//! bcrypt digests for passwords and remember tokens.
//!
//! A digest is the 60-character modular crypt string
//! `$2b$<cost>$<22-char salt><31-char hash>`. Salt and cost travel inside it,
//! so verification needs nothing but the digest and the presented secret.

use super::error::{Error, InvalidInput, Result};
use bcrypt::Version;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::{
    env::{self, VarError},
    fmt,
    str::FromStr,
};
use tracing::{debug, instrument};

/// Environment variable consulted by [`Hasher::from_env`].
pub const ENV_COST_POLICY: &str = "PASSKEEP_COST_POLICY";

/// Longest secret bcrypt consumes; anything past it would be ignored.
pub const MAX_SECRET_LEN: usize = 72;

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 60;
const SALT_AND_HASH_LEN: usize = 53;
const MAX_COST: u32 = 31;

/// Work factor selection, chosen by the caller per environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostPolicy {
    /// bcrypt's minimum cost; for test suites only.
    Minimal,
    #[default]
    Standard,
}

impl CostPolicy {
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Minimal => MIN_COST,
            Self::Standard => bcrypt::DEFAULT_COST,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for CostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "standard" => Ok(Self::Standard),
            other => Err(Error::InvalidCostPolicy(other.to_string())),
        }
    }
}

/// Stateless bcrypt hasher bound to one [`CostPolicy`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    policy: CostPolicy,
}

impl Hasher {
    #[must_use]
    pub const fn new(policy: CostPolicy) -> Self {
        Self { policy }
    }

    /// Build a hasher from `PASSKEEP_COST_POLICY`, defaulting to `standard`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCostPolicy`] if the variable is set to anything
    /// other than `minimal` or `standard`, including non-Unicode values.
    pub fn from_env() -> Result<Self> {
        match env::var(ENV_COST_POLICY) {
            Ok(value) => Ok(Self::new(value.parse()?)),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(value)) => Err(Error::InvalidCostPolicy(
                value.to_string_lossy().into_owned(),
            )),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> CostPolicy {
        self.policy
    }

    /// Hash `secret` with a fresh salt from the OS random source.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidInput`] if the secret is empty, longer than
    ///   [`MAX_SECRET_LEN`] bytes or contains a NUL byte.
    /// * [`Error::RandomSource`] if the OS random source fails.
    /// * [`Error::Backend`] if bcrypt itself fails.
    #[instrument(skip_all, fields(policy = %self.policy))]
    pub fn hash(&self, secret: &str) -> Result<String> {
        self.hash_with_rng(&mut OsRng, secret)
    }

    pub(crate) fn hash_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        secret: &str,
    ) -> Result<String> {
        check_secret(secret)?;

        let mut salt = [0u8; SALT_LEN];
        rng.try_fill_bytes(&mut salt)?;

        let parts = bcrypt::hash_with_salt(secret, self.policy.cost(), salt)
            .map_err(|e| Error::Backend(e.to_string()))?;

        Ok(parts.format_for_version(Version::TwoB))
    }

    /// Check `secret` against a stored digest. See [`verify`].
    #[must_use]
    pub fn verify(&self, secret: &str, hashed: &str) -> bool {
        verify(secret, hashed)
    }

    /// Work factor embedded in `hashed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedHash`] if `hashed` is not a bcrypt digest.
    pub fn cost_of(&self, hashed: &str) -> Result<u32> {
        parse_cost(hashed)
    }

    /// Whether `hashed` should be replaced by a digest made with this policy.
    ///
    /// Malformed digests always need rehashing.
    #[must_use]
    pub fn needs_rehash(&self, hashed: &str) -> bool {
        parse_cost(hashed).map_or(true, |cost| cost != self.policy.cost())
    }
}

/// Returns true iff `secret` re-derives to `hashed`.
///
/// Never fails: malformed digests and secrets that could not have been hashed
/// are plain mismatches.
#[must_use]
#[instrument(skip_all)]
pub fn verify(secret: &str, hashed: &str) -> bool {
    if check_secret(secret).is_err() {
        return false;
    }

    if let Err(e) = parse_cost(hashed) {
        debug!("rejecting stored digest: {e}");
        return false;
    }

    match bcrypt::verify(secret, hashed) {
        Ok(valid) => valid,
        Err(e) => {
            debug!("bcrypt verify failed: {e}");
            false
        }
    }
}

fn check_secret(secret: &str) -> Result<(), InvalidInput> {
    if secret.is_empty() {
        return Err(InvalidInput::Empty);
    }
    if secret.len() > MAX_SECRET_LEN {
        return Err(InvalidInput::TooLong {
            len: secret.len(),
            max: MAX_SECRET_LEN,
        });
    }
    if secret.as_bytes().contains(&0) {
        return Err(InvalidInput::NulByte);
    }
    Ok(())
}

fn parse_cost(hashed: &str) -> Result<u32> {
    if hashed.len() != DIGEST_LEN {
        return Err(Error::MalformedHash);
    }

    let mut fields = hashed.split('$');
    let (Some(""), Some(version), Some(cost), Some(rest), None) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(Error::MalformedHash);
    };

    if !matches!(version, "2a" | "2b" | "2x" | "2y") {
        return Err(Error::MalformedHash);
    }

    if cost.len() != 2 {
        return Err(Error::MalformedHash);
    }
    let cost: u32 = cost.parse().map_err(|_| Error::MalformedHash)?;
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(Error::MalformedHash);
    }

    if rest.len() != SALT_AND_HASH_LEN
        || !rest
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'/')
    {
        return Err(Error::MalformedHash);
    }

    Ok(cost)
}
