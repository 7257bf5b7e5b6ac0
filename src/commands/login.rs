use crate::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;

static DEVICE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Enter the code (\w+) to authenticate\.").expect("device-code pattern is valid")
});

/// Starts the backend's own sign-in to the cloud provider and hands the
/// device code over to the user.
pub struct Login<'a, 'b> {
    env: &'a mut Environment<'b>,
    wait_for_paste: bool,
}

impl<'a, 'b> Login<'a, 'b> {
    pub fn new(env: &'a mut Environment<'b>) -> Self {
        Self {
            env,
            wait_for_paste: false,
        }
    }

    /// Doesn't return until the copied code gets taken over by some other
    /// application; for one-shot invocations, after which nothing would
    /// keep the clipboard's contents around.
    pub fn waiting_for_paste(mut self) -> Self {
        self.wait_for_paste = true;
        self
    }

    /// Returns the device code, if the backend provided any.
    pub fn run(self) -> Result<Option<String>> {
        let message = self
            .env
            .backend()
            .login()
            .context("Couldn't start logging in")?;

        let Some(code) = extract_device_code(&message) else {
            log::debug!("No device code in: {}", message);
            writeln!(self.env.stdout, "{} {}", "[ OK ]".green(), message)?;

            return Ok(None);
        };

        let copied = match self.env.clipboard.copy(&code) {
            Ok(()) => {
                log::info!("Device code copied to clipboard");
                true
            }

            Err(err) => {
                log::error!("Couldn't copy device code: {:?}", err);
                false
            }
        };

        writeln!(self.env.stdout, "Device Code: {}", code.bold())?;

        writeln!(
            self.env.stdout,
            "The code has been copied to your clipboard. Please use it to complete the login process."
        )?;

        if copied && self.wait_for_paste {
            writeln!(
                self.env.stdout,
                "{}",
                "Waiting for the code to be pasted (press Ctrl+C to quit)".dimmed()
            )?;

            self.env.stdout.flush()?;

            if let Err(err) = self.env.clipboard.persist() {
                log::error!("Couldn't keep device code in clipboard: {:?}", err);
            }
        }

        Ok(Some(code))
    }
}

pub fn extract_device_code(message: &str) -> Option<String> {
    DEVICE_CODE
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|code| code.as_str().to_owned())
}
