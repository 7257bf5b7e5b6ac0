use anyhow::{Context, Result};

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;

    /// Makes the last copied text outlive this process; may block until
    /// some other application takes it over.
    fn persist(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The operating system's clipboard.
///
/// It's opened on the first copy, so that headless sessions don't fail
/// until something actually gets copied, and then kept open: on Linux the
/// copied text is served by us for as long as the handle lives.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,

    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    text: Option<String>,
}

impl SystemClipboard {
    fn handle(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.handle.is_none() {
            self.handle = Some(arboard::Clipboard::new().context("Couldn't access clipboard")?);
        }

        self.handle
            .as_mut()
            .context("Couldn't access clipboard")
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.handle()?
            .set_text(text)
            .context("Couldn't copy text to clipboard")?;

        self.text = Some(text.to_owned());

        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn persist(&mut self) -> Result<()> {
        use arboard::SetExtLinux;

        let Some(text) = self.text.clone() else {
            return Ok(());
        };

        self.handle()?
            .set()
            .wait()
            .text(text)
            .context("Couldn't hand clipboard over")
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct FakeClipboard {
    contents: Option<String>,
    persisted: bool,
    broken: bool,
}

#[cfg(test)]
impl FakeClipboard {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn persisted(&self) -> bool {
        self.persisted
    }
}

#[cfg(test)]
impl Clipboard for FakeClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if self.broken {
            anyhow::bail!("no clipboard available");
        }

        self.contents = Some(text.to_owned());

        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        if self.broken {
            anyhow::bail!("no clipboard available");
        }

        self.persisted = self.contents.is_some();

        Ok(())
    }
}
