use ansi_parser::{AnsiParser, AnsiSequence, Output};
use itertools::Itertools;
use std::fmt::Write;

#[macro_export]
macro_rules! assert_stdout {
    ($expected:literal, $actual:expr) => {
        $crate::testing::assert_out(
            indoc::indoc!($expected).trim(),
            String::from_utf8_lossy(&$actual).trim(),
        );
    };
}

#[macro_export]
macro_rules! assert_result {
    ($expected:literal, $actual:expr) => {
        let actual = format!("{:?}", $actual.unwrap_err());

        pretty_assertions::assert_str_eq!(indoc::indoc!($expected).trim(), actual);
    };
}

#[macro_export]
macro_rules! assert_requests {
    ($expected:literal, $actual:expr) => {
        pretty_assertions::assert_str_eq!(indoc::indoc!($expected), $actual.to_string());
    };
}

/// Makes `colored` emit escape codes even when stdout is not a terminal, so
/// that colors can be asserted.
pub fn force_colors() {
    colored::control::set_override(true);
}

/// Compares outputs, with ANSI escape codes rendered into HTML-ish tags
/// (`<b>`, `<fg=31>` etc.), so that colors can be asserted too.
#[track_caller]
pub fn assert_out(expected: impl AsRef<str>, actual: impl AsRef<str>) {
    let actual = render_ansi_codes(actual);
    let actual = sanitize_empty_lines(actual);
    let expected = sanitize_empty_lines(expected);

    pretty_assertions::assert_str_eq!(expected, actual);
}

/// Like [`assert_out()`], but only requires `expected` to be a part of
/// `actual`.
#[track_caller]
pub fn assert_out_contains(expected: impl AsRef<str>, actual: impl AsRef<str>) {
    let actual = sanitize_empty_lines(render_ansi_codes(actual));
    let expected = sanitize_empty_lines(expected);

    assert!(
        actual.contains(&expected),
        "expected to find:\n{}\n\nin:\n{}",
        expected,
        actual
    );
}

fn render_ansi_codes(s: impl AsRef<str>) -> String {
    let mut out = String::new();
    let mut active_modes = Vec::new();

    for item in s.as_ref().ansi_parse() {
        match item {
            Output::TextBlock(text) => {
                _ = write!(out, "{}", text);
            }

            Output::Escape(AnsiSequence::SetGraphicsMode(modes)) => {
                for mode in modes {
                    let tag = match mode {
                        0 => {
                            while let Some(mode) = active_modes.pop() {
                                _ = write!(out, "</{}>", mode);
                            }

                            continue;
                        }

                        1 => "b",
                        2 => "dim",
                        3 => "i",

                        color @ 30..=37 => {
                            _ = write!(out, "<fg={}>", color);
                            active_modes.push("fg");
                            continue;
                        }

                        mode => {
                            panic!("Unrecognized SetGraphicsMode: {}", mode);
                        }
                    };

                    _ = write!(out, "<{}>", tag);
                    active_modes.push(tag);
                }
            }

            Output::Escape(escape) => {
                panic!("Unrecognized escape: {:?}", escape);
            }
        }
    }

    out
}

fn sanitize_empty_lines(s: impl AsRef<str>) -> String {
    s.as_ref()
        .lines()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .join("\n")
}
