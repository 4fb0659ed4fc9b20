//! Credential hashing and remember-session management.

pub mod error;
pub mod hasher;
pub mod remember;
pub mod token;

#[cfg(test)]
mod test_support;

pub use self::error::{Error, InvalidInput, Result};
pub use self::hasher::{verify, CostPolicy, Hasher, MAX_SECRET_LEN};
pub use self::remember::{
    DigestChange, RememberManager, RememberSession, RememberState, Remembered,
};
pub use self::token::{new_token, TokenGenerator};
