use crate::prelude::*;

pub struct SignIn<'a, 'b> {
    env: &'a mut Environment<'b>,
}

impl<'a, 'b> SignIn<'a, 'b> {
    pub fn new(env: &'a mut Environment<'b>) -> Self {
        Self { env }
    }

    pub fn run(self) -> Result<()> {
        if self.env.identity.is_signed_in() {
            writeln!(
                self.env.stdout,
                "Already signed in as {}",
                account(self.env.identity.account()).bold()
            )?;

            return Ok(());
        }

        self.env
            .identity
            .sign_in(self.env.stdout)
            .context("Couldn't sign in")?;

        writeln!(
            self.env.stdout,
            "{} Signed in as {}",
            "[ OK ]".green(),
            account(self.env.identity.account()).bold()
        )?;

        Ok(())
    }
}

fn account(account: Option<&str>) -> &str {
    account.unwrap_or("unknown account")
}
