use crate::prelude::*;

pub struct SignOut<'a, 'b> {
    env: &'a mut Environment<'b>,
}

impl<'a, 'b> SignOut<'a, 'b> {
    pub fn new(env: &'a mut Environment<'b>) -> Self {
        Self { env }
    }

    pub fn run(self) -> Result<()> {
        self.env.identity.sign_out().context("Couldn't sign out")?;

        writeln!(self.env.stdout, "{} Signed out", "[ OK ]".green())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_stdout;
    use crate::clipboard::FakeClipboard;
    use crate::http::FakeTransport;
    use crate::identity::{FakeIdentity, IdentityProvider};

    #[test]
    fn test() {
        let mut stdout = Vec::new();
        let mut stdin: &[u8] = &[];
        let config = Config::default();
        let mut identity = FakeIdentity::signed_in("token-1");
        let mut transport = FakeTransport::default();
        let mut clipboard = FakeClipboard::default();

        SignOut::new(&mut Environment::test(
            &mut stdout,
            &mut stdin,
            &config,
            &mut identity,
            &mut transport,
            &mut clipboard,
        ))
        .run()
        .unwrap();

        assert!(!identity.is_signed_in());

        assert_stdout!(
            r#"
            <fg=32>[ OK ]</fg> Signed out
            "#,
            stdout
        );
    }
}
