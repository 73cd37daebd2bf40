//! Turning a module input line into a typed clap command.
//!
//! Lines are split with shell quoting rules, then handed to the module's clap
//! parser. Help requests are separated from genuine errors because the former
//! count as a successful, non-mutating command.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

#[derive(Debug)]
pub enum ParseOutcome<C> {
    /// Nothing but whitespace.
    Empty,
    Command(C),
    /// `--help`, `-h` or `help`: rendered help text.
    Help(String),
    /// Rejected input with the message to show.
    Invalid(String),
}

pub fn tokenize(input: &str) -> Option<Vec<String>> {
    shlex::split(input)
}

/// Parse a line for a clap parser declared with `no_binary_name = true`.
pub fn parse_line<C: Parser>(input: &str) -> ParseOutcome<C> {
    let Some(tokens) = tokenize(input) else {
        return ParseOutcome::Invalid("error: unbalanced quotes in input".to_string());
    };
    if tokens.is_empty() {
        return ParseOutcome::Empty;
    }

    match C::try_parse_from(tokens) {
        Ok(command) => ParseOutcome::Command(command),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                ParseOutcome::Help(e.render().to_string())
            }
            _ => ParseOutcome::Invalid(e.render().to_string()),
        },
    }
}

pub fn render_help<C: CommandFactory>() -> String {
    C::command().render_help().to_string()
}
