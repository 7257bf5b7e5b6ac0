use crate::feedback::Tone;
use chrono::{DateTime, FixedOffset};
use colored::Colorize;
use std::fmt;

/// How many of the most recent entries get rendered.
pub const VISIBLE_ENTRIES: usize = 10;

/// Append-only record of what happened during the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<String>,
}

impl ActivityLog {
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn recent(&self) -> &[String] {
        let skip = self.entries.len().saturating_sub(VISIBLE_ENTRIES);

        &self.entries[skip..]
    }

    /// Prepares the activity monitor; all entries are stamped with `now`,
    /// since the log doesn't keep track of when things actually happened.
    pub fn monitor(&self, now: DateTime<FixedOffset>) -> ActivityMonitor<'_> {
        ActivityMonitor { log: self, now }
    }
}

/// Classifies an entry by its wording.
pub fn tone_of(entry: &str) -> Tone {
    let entry = entry.to_lowercase();

    if entry.contains("error") {
        Tone::Danger
    } else if entry.contains("success") {
        Tone::Success
    } else {
        Tone::Info
    }
}

pub struct ActivityMonitor<'a> {
    log: &'a ActivityLog,
    now: DateTime<FixedOffset>,
}

impl fmt::Display for ActivityMonitor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = "Activity Monitor";
        let timestamp = self.now.format("%H:%M:%S").to_string();
        let timestamp = timestamp.dimmed();

        writeln!(f, "{}", title.bold())?;
        writeln!(f, "{}", "-".repeat(title.len()))?;

        for entry in self.log.recent() {
            writeln!(f, "  {} {}", timestamp, tone_of(entry).paint(entry))?;
        }

        Ok(())
    }
}
