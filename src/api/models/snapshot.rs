use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

/// Snapshot as reported by the list-by-age query; display-only.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub name: String,
    pub resource_group: String,
    pub creation_time: String,
}

impl Snapshot {
    /// Creation time normalized to whole seconds in UTC; timestamps that
    /// don't parse are shown as the backend sent them.
    pub fn created_at(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.creation_time) {
            Ok(time) => time
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true),

            Err(err) => {
                log::debug!(
                    "Couldn't parse creation time of `{}` ({}): {}",
                    self.name,
                    self.creation_time,
                    err
                );

                self.creation_time.clone()
            }
        }
    }
}
