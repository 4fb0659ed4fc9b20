pub mod password;
pub mod remember;

mod io;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

#[derive(Debug)]
pub enum Action {
    Hash(password::HashArgs),
    Verify(password::VerifyArgs),
    Inspect(password::InspectArgs),
    Token,
    Remember(remember::RememberArgs),
    Authenticate(remember::AuthenticateArgs),
    Forget(remember::ForgetArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
