use crate::cli::actions::{password, remember, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Hash(args) => password::hash(args).await,
        Action::Verify(args) => password::verify(args).await,
        Action::Inspect(args) => password::inspect(&args),
        Action::Token => remember::token(),
        Action::Remember(args) => remember::remember(args).await,
        Action::Authenticate(args) => remember::authenticate(args).await,
        Action::Forget(args) => remember::forget(&args),
    }
}
