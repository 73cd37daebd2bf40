//! Console messages shared by the router, the loader report and modules.
//!
//! Everything user-facing funnels through [`CmdMessage`] so that colouring stays
//! consistent. Diagnostics that are not meant for the user go through `log`.

use colored::{ColoredString, Colorize};
use std::fmt::Display;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

fn styled(message: &CmdMessage) -> ColoredString {
    let content = message.content.as_str();
    match message.level {
        MessageLevel::Info => content.dimmed(),
        MessageLevel::Success => content.green(),
        MessageLevel::Warning => content.yellow(),
        MessageLevel::Error => content.red(),
    }
}

pub fn write_message(out: &mut dyn Write, message: &CmdMessage) -> io::Result<()> {
    writeln!(out, "{}", styled(message))
}

pub fn write_messages(out: &mut dyn Write, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        write_message(out, message)?;
    }
    Ok(())
}

/// Prints a warning to stderr. Used by layers that have no output handle of
/// their own (store, configuration).
pub fn report_warning(content: impl Display) {
    let content = content.to_string();
    log::debug!("warning: {}", content);
    eprintln!("{}", format!("Warning: {}", content).yellow());
}

/// Prints a recoverable error to stderr.
pub fn report_error(content: impl Display) {
    let content = content.to_string();
    log::debug!("error: {}", content);
    eprintln!("{}", content.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_message() {
        let mut out = Vec::new();
        write_messages(
            &mut out,
            &[CmdMessage::info("first"), CmdMessage::error("second")],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    fn levels_map_to_styles() {
        assert_eq!(styled(&CmdMessage::info("note")), "note".dimmed());
        assert_eq!(styled(&CmdMessage::success("ok")), "ok".green());
        assert_eq!(styled(&CmdMessage::warning("hm")), "hm".yellow());
        assert_eq!(styled(&CmdMessage::error("no")), "no".red());
    }
}
