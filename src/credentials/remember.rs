//! Remember-me sessions.
//!
//! A user has at most one `remember_digest`. Remembering replaces it, which
//! invalidates every raw token issued before; forgetting clears it. The
//! manager only computes the new column value, the caller writes it.

use super::{
    error::Result,
    hasher::{verify, CostPolicy, Hasher},
    token::new_token,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

/// Persistence instruction for the caller's `remember_digest` column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the caller must persist the digest change"]
pub enum DigestChange {
    Set(String),
    Clear,
}

impl DigestChange {
    /// Write the change into a `remember_digest` slot.
    pub fn apply_to(self, slot: &mut Option<String>) {
        *slot = match self {
            Self::Set(digest) => Some(digest),
            Self::Clear => None,
        };
    }

    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        match self {
            Self::Set(digest) => Some(digest),
            Self::Clear => None,
        }
    }
}

/// Result of [`RememberManager::remember`].
#[derive(Debug)]
#[must_use]
pub struct Remembered {
    /// Raw token for the client (e.g. a persistent cookie). Never store it.
    pub token: SecretString,
    pub change: DigestChange,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RememberState {
    #[default]
    NoRememberedSession,
    RememberedSession,
}

/// In-memory view of a user's `remember_digest`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RememberSession {
    digest: Option<String>,
}

impl RememberSession {
    #[must_use]
    pub fn new(digest: Option<String>) -> Self {
        Self {
            digest: digest.filter(|d| !d.is_empty()),
        }
    }

    #[must_use]
    pub fn state(&self) -> RememberState {
        match self.digest {
            Some(_) => RememberState::RememberedSession,
            None => RememberState::NoRememberedSession,
        }
    }

    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn apply(&mut self, change: DigestChange) {
        change.apply_to(&mut self.digest);
    }
}

/// Issues, checks and revokes remember tokens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RememberManager {
    hasher: Hasher,
}

impl RememberManager {
    #[must_use]
    pub const fn new(hasher: Hasher) -> Self {
        Self { hasher }
    }

    #[must_use]
    pub const fn with_policy(policy: CostPolicy) -> Self {
        Self::new(Hasher::new(policy))
    }

    #[must_use]
    pub const fn hasher(&self) -> Hasher {
        self.hasher
    }

    /// Mint a raw token and the digest that replaces the user's current one.
    ///
    /// # Errors
    ///
    /// Returns [`super::Error::RandomSource`] if no token can be generated, or
    /// [`super::Error::Backend`] if hashing fails.
    #[instrument(skip_all)]
    pub fn remember(&self) -> Result<Remembered> {
        let token = new_token()?;
        let digest = self.hasher.hash(token.expose_secret())?;
        debug!("issued remember token");
        Ok(Remembered {
            token,
            change: DigestChange::Set(digest),
        })
    }

    /// Check a presented token against the stored digest.
    ///
    /// An absent or empty digest means no remembered session and is `false`
    /// without hashing anything.
    #[must_use]
    pub fn authenticated(&self, stored: Option<&str>, presented: &str) -> bool {
        match stored {
            Some(digest) if !digest.is_empty() => verify(presented, digest),
            _ => false,
        }
    }

    /// Clear the user's digest. Forgetting twice is the same as once.
    pub fn forget(&self) -> DigestChange {
        DigestChange::Clear
    }
}
