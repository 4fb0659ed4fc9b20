//! `hash`, `verify` and `inspect`: password digests from the shell.

use super::io::{emit, secret_or_stdin};
use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::task;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct HashArgs {
    pub globals: GlobalArgs,
    pub secret: Option<SecretString>,
}

#[derive(Debug)]
pub struct VerifyArgs {
    pub globals: GlobalArgs,
    pub secret: Option<SecretString>,
    pub digest: String,
}

#[derive(Debug)]
pub struct InspectArgs {
    pub globals: GlobalArgs,
    pub digest: String,
}

#[derive(Debug, Serialize)]
struct HashOutput<'a> {
    digest: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct VerifyOutput {
    valid: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct InspectOutput {
    cost: u32,
    needs_rehash: bool,
}

/// Print the bcrypt digest of the secret.
/// # Errors
/// Returns an error if the secret cannot be read or hashed.
#[instrument(skip_all)]
pub async fn hash(args: HashArgs) -> Result<()> {
    let secret = secret_or_stdin(args.secret).await?;
    let hasher = args.globals.hasher();

    let digest = task::spawn_blocking(move || hasher.hash(secret.expose_secret()))
        .await
        .context("hashing task failed")?
        .context("failed to hash secret")?;

    info!(policy = %hasher.policy(), "secret hashed");
    emit(&HashOutput { digest: &digest })
}

/// Print whether the secret matches the digest.
/// # Errors
/// Returns an error only if the secret cannot be read; a mismatch is `valid: false`.
#[instrument(skip_all)]
pub async fn verify(args: VerifyArgs) -> Result<()> {
    let secret = secret_or_stdin(args.secret).await?;
    let hasher = args.globals.hasher();
    let digest = args.digest;

    let valid = task::spawn_blocking(move || hasher.verify(secret.expose_secret(), &digest))
        .await
        .context("verification task failed")?;

    info!(valid, "secret checked");
    emit(&VerifyOutput { valid })
}

/// Print the work factor of the digest and whether the configured policy would rehash it.
/// # Errors
/// Returns an error if the digest is not a bcrypt digest.
pub fn inspect(args: &InspectArgs) -> Result<()> {
    emit(&inspect_output(args)?)
}

fn inspect_output(args: &InspectArgs) -> Result<InspectOutput> {
    let hasher = args.globals.hasher();
    let cost = hasher
        .cost_of(&args.digest)
        .context("digest is not a bcrypt digest")?;

    Ok(InspectOutput {
        cost,
        needs_rehash: hasher.needs_rehash(&args.digest),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credentials::{CostPolicy, Hasher};

    const MINIMAL: GlobalArgs = GlobalArgs::new(CostPolicy::Minimal);

    #[test]
    fn inspect_reports_cost_and_rehash() {
        let digest = Hasher::new(CostPolicy::Minimal).hash("secret").unwrap();

        let same = inspect_output(&InspectArgs {
            globals: MINIMAL,
            digest: digest.clone(),
        })
        .unwrap();
        assert_eq!(
            same,
            InspectOutput {
                cost: 4,
                needs_rehash: false
            }
        );

        let upgraded = inspect_output(&InspectArgs {
            globals: GlobalArgs::new(CostPolicy::Standard),
            digest,
        })
        .unwrap();
        assert!(upgraded.needs_rehash);
    }

    #[test]
    fn inspect_rejects_malformed_digest() {
        let result = inspect_output(&InspectArgs {
            globals: MINIMAL,
            digest: "plaintext".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn hash_output_shape() {
        let digest = MINIMAL.hasher().hash("secret").unwrap();
        let json = serde_json::to_string(&HashOutput { digest: &digest }).unwrap();
        assert_eq!(json, format!(r#"{{"digest":"{digest}"}}"#));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(MINIMAL.hasher().verify("secret", parsed["digest"].as_str().unwrap()));
    }

    #[test]
    fn verify_output_shape() {
        let json = serde_json::to_string(&VerifyOutput { valid: false }).unwrap();
        assert_eq!(json, r#"{"valid":false}"#);
    }

    #[tokio::test]
    async fn hash_and_verify_actions_succeed() {
        hash(HashArgs {
            globals: MINIMAL,
            secret: Some(SecretString::from("Secret123!".to_string())),
        })
        .await
        .unwrap();

        let digest = MINIMAL.hasher().hash("Secret123!").unwrap();
        verify(VerifyArgs {
            globals: MINIMAL,
            secret: Some(SecretString::from("secret123!".to_string())),
            digest,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn hash_action_rejects_empty_secret() {
        let result = hash(HashArgs {
            globals: MINIMAL,
            secret: Some(SecretString::from(String::new())),
        })
        .await;
        assert!(result.is_err());
    }
}
