mod clients;
mod error;
mod models;
mod session;

pub use self::{clients::*, error::*, models::*, session::*};

use std::io::Write;

/// Signs the user in and hands out bearer tokens for the backend.
pub trait IdentityProvider {
    fn is_signed_in(&self) -> bool;

    /// Name of the signed-in account, when the provider told us one.
    fn account(&self) -> Option<&str>;

    fn sign_in(&mut self, prompt: &mut dyn Write) -> IdentityResult<()> {
        self.acquire_token_interactive(prompt).map(drop)
    }

    fn sign_out(&mut self) -> IdentityResult<()>;

    /// Returns a token without bothering the user; fails with
    /// [`IdentityError::InteractionRequired`] when that's not possible.
    fn acquire_token_silent(&mut self) -> IdentityResult<AuthToken>;

    /// Returns a token, asking the user to sign in (via `prompt`) if needed.
    fn acquire_token_interactive(&mut self, prompt: &mut dyn Write) -> IdentityResult<AuthToken>;
}
