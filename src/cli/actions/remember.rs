//! `token`, `remember`, `authenticate` and `forget`: remember-me sessions from the shell.

use super::io::emit;
use crate::cli::globals::GlobalArgs;
use crate::credentials::new_token;
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::task;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct RememberArgs {
    pub globals: GlobalArgs,
}

#[derive(Debug)]
pub struct AuthenticateArgs {
    pub globals: GlobalArgs,
    pub digest: Option<String>,
    pub token: SecretString,
}

#[derive(Debug)]
pub struct ForgetArgs {
    pub globals: GlobalArgs,
}

#[derive(Debug, Serialize)]
struct TokenOutput<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct RememberOutput<'a> {
    token: &'a str,
    remember_digest: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AuthenticateOutput {
    authenticated: bool,
}

#[derive(Debug, Serialize)]
struct ForgetOutput<'a> {
    remember_digest: Option<&'a str>,
}

/// Print a raw token without hashing it.
/// # Errors
/// Returns an error if the OS random source fails.
pub fn token() -> Result<()> {
    let token = new_token().context("failed to generate token")?;
    emit(&TokenOutput {
        token: token.expose_secret(),
    })
}

/// Print a new raw token together with the digest the caller must persist.
/// # Errors
/// Returns an error if the token cannot be generated or hashed.
#[instrument(skip_all)]
pub async fn remember(args: RememberArgs) -> Result<()> {
    let manager = args.globals.remember_manager();

    let remembered = task::spawn_blocking(move || manager.remember())
        .await
        .context("remember task failed")?
        .context("failed to issue remember token")?;

    info!("remember token issued");
    emit(&RememberOutput {
        token: remembered.token.expose_secret(),
        remember_digest: remembered.change.digest(),
    })
}

/// Print whether the presented token matches the stored digest.
/// # Errors
/// Returns an error only if the blocking task fails; a mismatch is `authenticated: false`.
#[instrument(skip_all)]
pub async fn authenticate(args: AuthenticateArgs) -> Result<()> {
    let manager = args.globals.remember_manager();
    let AuthenticateArgs { digest, token, .. } = args;

    let authenticated =
        task::spawn_blocking(move || manager.authenticated(digest.as_deref(), token.expose_secret()))
            .await
            .context("authentication task failed")?;

    info!(authenticated, "remember token checked");
    emit(&AuthenticateOutput { authenticated })
}

/// Print the cleared digest.
/// # Errors
/// Returns an error if the output cannot be written.
pub fn forget(args: &ForgetArgs) -> Result<()> {
    let change = args.globals.remember_manager().forget();
    emit(&ForgetOutput {
        remember_digest: change.digest(),
    })
}
