mod backend;
mod identity;
mod serde;

use crate::prelude::*;
use ::serde::Deserialize;
use std::{fs, path::Path};

pub use self::{backend::*, identity::*};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    backend: BackendConfig,

    #[serde(default)]
    identity: IdentityConfig,
}

impl Config {
    #[cfg(test)]
    pub fn parse(code: &str) -> Self {
        serde_yaml::from_str(code).unwrap()
    }

    pub fn load(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();

        let result: Result<_> = (|| {
            let code = fs::read_to_string(file).context("Couldn't read file")?;
            serde_yaml::from_str(&code).context("Couldn't parse file")
        })();

        result.with_context(|| format!("Couldn't load configuration from: {}", file.display()))
    }

    /// Loads configuration from given file or, when no file has been given
    /// explicitly, from `config.yaml` if it exists.
    pub fn discover(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(file) => Self::load(file),

            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),

            None => {
                log::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides settings with values of the `AZURE_*` and
    /// `SNAPSHOT_MANAGER_*` environment variables.
    pub fn with_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        self.backend.apply_env(&var);
        self.identity.apply_env(&var);
        self
    }

    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.backend.set_url(url);
        }

        self
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    pub fn identity(&self) -> &IdentityConfig {
        &self.identity
    }
}
