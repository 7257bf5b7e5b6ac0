use colored::{ColoredString, Colorize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Danger,
}

impl Tone {
    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Tone::Info => text.cyan(),
            Tone::Success => text.green(),
            Tone::Danger => text.red(),
        }
    }
}

/// The banner shown after a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub tone: Tone,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Success,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Danger,
        }
    }

    pub fn is_success(&self) -> bool {
        self.tone == Tone::Success
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.tone {
            Tone::Info => "[ INFO ]",
            Tone::Success => "[ OK ]",
            Tone::Danger => "[ FAILED ]",
        };

        write!(f, "{} {}", self.tone.paint(tag), self.message)
    }
}
