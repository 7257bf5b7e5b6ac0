use super::serde::deserialize_duration;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "kebab-case")]
pub struct BackendConfig {
    #[serde(default = "default_url")]
    url: String,

    #[serde(default = "default_timeout")]
    #[serde(deserialize_with = "deserialize_duration")]
    timeout: Duration,
}

impl BackendConfig {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(super) fn apply_env(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("SNAPSHOT_MANAGER_URL").filter(|url| !url.is_empty()) {
            self.url = url;
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8080".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
