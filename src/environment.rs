use crate::api::Backend;
use crate::clipboard::Clipboard;
use crate::http::Transport;
use crate::identity::IdentityProvider;
use crate::prelude::*;

pub struct Environment<'a> {
    pub time: fn() -> DateTime<FixedOffset>,
    pub stdout: &'a mut dyn Write,
    pub stdin: &'a mut dyn BufRead,
    pub config: &'a Config,
    pub identity: &'a mut dyn IdentityProvider,
    pub transport: &'a mut dyn Transport,
    pub clipboard: &'a mut dyn Clipboard,
}

impl<'a> Environment<'a> {
    #[cfg(test)]
    pub fn test(
        stdout: &'a mut dyn Write,
        stdin: &'a mut dyn BufRead,
        config: &'a Config,
        identity: &'a mut dyn IdentityProvider,
        transport: &'a mut dyn Transport,
        clipboard: &'a mut dyn Clipboard,
    ) -> Self {
        use chrono::TimeZone;

        crate::testing::force_colors();

        Self {
            time: || FixedOffset::east_opt(0).unwrap().timestamp_opt(0, 0).unwrap(),
            stdout,
            stdin,
            config,
            identity,
            transport,
            clipboard,
        }
    }

    /// Local time, used to stamp the activity monitor.
    pub fn time(&self) -> DateTime<FixedOffset> {
        (self.time)()
    }

    pub fn backend(&mut self) -> Backend<'_> {
        Backend::new(self.config.backend().url(), &mut *self.transport)
    }

    /// Reads a single line from stdin, without the trailing newline; returns
    /// `None` at EOF.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        self.stdout.flush()?;

        let mut line = String::new();

        if self.stdin.read_line(&mut line).context("Couldn't read from stdin")? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}
