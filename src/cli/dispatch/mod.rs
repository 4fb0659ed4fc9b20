use crate::cli::{
    actions::{password, remember, Action},
    commands::{ARG_COST_POLICY, ARG_DIGEST, ARG_SECRET, ARG_TOKEN},
    globals::GlobalArgs,
};
use crate::credentials::CostPolicy;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or no subcommand was given.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let cost_policy = matches
        .get_one::<CostPolicy>(ARG_COST_POLICY)
        .copied()
        .unwrap_or_default();
    let globals = GlobalArgs::new(cost_policy);

    let secret = |sub: &clap::ArgMatches| {
        sub.get_one::<String>(ARG_SECRET)
            .cloned()
            .map(SecretString::from)
    };

    let digest = |sub: &clap::ArgMatches| sub.get_one::<String>(ARG_DIGEST).cloned();

    match matches.subcommand() {
        Some(("hash", sub)) => Ok(Action::Hash(password::HashArgs {
            globals,
            secret: secret(sub),
        })),
        Some(("verify", sub)) => Ok(Action::Verify(password::VerifyArgs {
            globals,
            secret: secret(sub),
            digest: digest(sub).context("missing required argument: --digest")?,
        })),
        Some(("inspect", sub)) => Ok(Action::Inspect(password::InspectArgs {
            globals,
            digest: digest(sub).context("missing required argument: --digest")?,
        })),
        Some(("token", _)) => Ok(Action::Token),
        Some(("remember", _)) => Ok(Action::Remember(remember::RememberArgs { globals })),
        Some(("authenticate", sub)) => Ok(Action::Authenticate(remember::AuthenticateArgs {
            globals,
            digest: digest(sub),
            token: sub
                .get_one::<String>(ARG_TOKEN)
                .cloned()
                .map(SecretString::from)
                .context("missing required argument: --token")?,
        })),
        Some(("forget", _)) => Ok(Action::Forget(remember::ForgetArgs { globals })),
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}
