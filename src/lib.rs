//! # Passkeep (password digests & remember-me tokens)
//!
//! `passkeep` is the credential core of a user identity record. It derives and
//! verifies bcrypt password digests and issues/validates opaque "remember me"
//! tokens for persistent login sessions.
//!
//! ## Digests
//!
//! Every stored value (`password_digest`, `remember_digest`) is a bcrypt digest
//! in modular crypt format. The digest embeds its salt and cost factor, so a
//! caller only ever stores the one string.
//!
//! The work factor comes from an explicit [`credentials::CostPolicy`]:
//! `minimal` for test suites, `standard` everywhere else. Nothing in the crate
//! inspects the environment on its own.
//!
//! ## Remember tokens
//!
//! Raw tokens are 256-bit values from the OS random source, encoded as
//! unpadded base64url. Only their digest is handed back for persistence; the
//! raw token leaves [`credentials::RememberManager::remember`] exactly once.
//!
//! ## Persistence
//!
//! The crate performs no I/O. Operations that change a user's remember state
//! return a [`credentials::DigestChange`] which the caller applies to its own
//! record store.

pub mod cli;
pub mod credentials;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
