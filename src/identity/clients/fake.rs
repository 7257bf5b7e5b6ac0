use crate::identity::*;
use std::io::Write;

/// Scripted identity provider, counting how often it's been asked for tokens.
#[derive(Debug)]
pub struct FakeIdentity {
    account: Option<&'static str>,
    silent: FakeSilent,
    interactive: Option<&'static str>,
    silent_calls: usize,
    interactive_calls: usize,
}

#[derive(Clone, Copy, Debug)]
enum FakeSilent {
    Token(&'static str),
    InteractionRequired,
    Failure,
}

impl FakeIdentity {
    /// Signed in, silently handing out `token`.
    pub fn signed_in(token: &'static str) -> Self {
        Self {
            account: Some("jane@contoso.com"),
            silent: FakeSilent::Token(token),
            interactive: Some(token),
            silent_calls: 0,
            interactive_calls: 0,
        }
    }

    /// Signed out; interactive sign-ins succeed.
    pub fn signed_out() -> Self {
        Self {
            account: None,
            silent: FakeSilent::InteractionRequired,
            interactive: Some("interactive-token"),
            silent_calls: 0,
            interactive_calls: 0,
        }
    }

    /// Signed in, but the session went stale and needs the user again.
    pub fn stale() -> Self {
        Self {
            silent: FakeSilent::InteractionRequired,
            ..Self::signed_in("stale-token")
        }
    }

    /// Signed in, but the provider is broken.
    pub fn broken() -> Self {
        Self {
            silent: FakeSilent::Failure,
            ..Self::signed_in("broken-token")
        }
    }

    pub fn with_failing_interaction(mut self) -> Self {
        self.interactive = None;
        self
    }

    pub fn silent_calls(&self) -> usize {
        self.silent_calls
    }

    pub fn interactive_calls(&self) -> usize {
        self.interactive_calls
    }
}

impl IdentityProvider for FakeIdentity {
    fn is_signed_in(&self) -> bool {
        self.account.is_some()
    }

    fn account(&self) -> Option<&str> {
        self.account
    }

    fn sign_out(&mut self) -> IdentityResult<()> {
        self.account = None;
        self.silent = FakeSilent::InteractionRequired;

        Ok(())
    }

    fn acquire_token_silent(&mut self) -> IdentityResult<AuthToken> {
        self.silent_calls += 1;

        match self.silent {
            FakeSilent::Token(token) => Ok(AuthToken::new(token)),
            FakeSilent::InteractionRequired => {
                Err(IdentityError::InteractionRequired("nobody is signed in".into()))
            }
            FakeSilent::Failure => Err(IdentityError::InjectedError),
        }
    }

    fn acquire_token_interactive(&mut self, prompt: &mut dyn Write) -> IdentityResult<AuthToken> {
        self.interactive_calls += 1;

        let token = self.interactive.ok_or(IdentityError::Provider {
            code: "authorization_declined".into(),
            description: "user closed the prompt".into(),
        })?;

        writeln!(prompt, "Enter the code FAKE1234 to authenticate.").map_err(anyhow::Error::from)?;

        self.account = Some("jane@contoso.com");
        self.silent = FakeSilent::Token(token);

        Ok(AuthToken::new(token))
    }
}
