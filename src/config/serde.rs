use serde::{de, Deserialize, Deserializer};
use std::time::Duration;

/// Deserializes human-friendly durations, such as `30s` or `2m 30s`.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    humantime::parse_duration(&value)
        .map_err(|err| de::Error::custom(format!("invalid duration `{}`: {}", value, err)))
}
