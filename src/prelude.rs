pub use crate::activity::*;
pub use crate::config::*;
pub use crate::environment::*;
pub use crate::feedback::*;
pub use crate::forms::*;
pub use anyhow::{anyhow, bail, Context, Result};
pub use chrono::{DateTime, FixedOffset, Utc};
pub use colored::Colorize;
pub use std::io::{BufRead, Write};

#[cfg(test)]
pub use indoc::indoc;

#[cfg(test)]
pub use pretty_assertions as pa;
