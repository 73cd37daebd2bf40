//! Notes commands.
//!
//! Handlers get their state from the module's [`ServiceResolver`] rather than
//! from the module itself, so they can run against any resolver that provides
//! a [`NoteBook`] and [`ListSettings`].

use super::model::{Note, NoteBook};
use crate::console::{write_message, CmdMessage};
use crate::error::Result;
use crate::module::CommandStatus;
use crate::services::ServiceResolver;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const DEFAULT_LIST_WIDTH: usize = 80;

#[derive(Parser, Debug)]
#[command(
    name = "notes",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Manage personal notes"
)]
pub struct NotesCli {
    #[command(subcommand)]
    pub command: NotesCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum NotesCommand {
    /// Adds a new note.
    Add {
        /// The text of the note to add. No quotes needed.
        #[arg(required = true, num_args = 1.., value_name = "NOTE_TEXT")]
        text: Vec<String>,
    },

    /// Lists all notes.
    #[command(alias = "ls")]
    List,

    /// Deletes a note by index.
    #[command(alias = "rm")]
    Delete {
        /// The 0-based index of the note to delete.
        index: usize,
    },

    /// Edits a note by index.
    Edit {
        /// The 0-based index of the note to edit.
        index: usize,

        /// The new text for the note.
        #[arg(required = true, num_args = 1.., value_name = "NEW_CONTENT")]
        content: Vec<String>,
    },
}

/// Display settings for `list`, taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSettings {
    pub width: usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_LIST_WIDTH,
        }
    }
}

impl NotesCommand {
    /// Whether a successful run changes the notes and must be persisted.
    pub fn mutates(&self) -> bool {
        !matches!(self, NotesCommand::List)
    }

    pub fn execute(self, services: &ServiceResolver, out: &mut dyn Write) -> Result<CommandStatus> {
        let book = services.require::<NoteBook>()?;

        let message = match self {
            NotesCommand::Add { text } => {
                book.add(Note::new(text.join(" ")));
                CmdMessage::success("Note added.")
            }
            NotesCommand::List => {
                let settings = services.resolve::<ListSettings>().unwrap_or_default();
                return list(&book, settings.width, out);
            }
            NotesCommand::Delete { index } => match book.delete(index) {
                Some(_) => CmdMessage::success("Note deleted."),
                None => return invalid_index(out),
            },
            NotesCommand::Edit { index, content } => {
                if book.edit(index, content.join(" ")) {
                    CmdMessage::success("Note edited.")
                } else {
                    return invalid_index(out);
                }
            }
        };

        write_message(out, &message)?;
        Ok(CommandStatus::Success)
    }
}

fn invalid_index(out: &mut dyn Write) -> Result<CommandStatus> {
    write_message(
        out,
        &CmdMessage::error("Please provide a valid note index."),
    )?;
    Ok(CommandStatus::Failure)
}

fn list(book: &NoteBook, width: usize, out: &mut dyn Write) -> Result<CommandStatus> {
    let notes = book.snapshot();
    if notes.is_empty() {
        writeln!(out, "No notes available.")?;
        return Ok(CommandStatus::Success);
    }

    let now = Utc::now();
    for (i, note) in notes.iter().enumerate() {
        let prefix = format!("{}: ", i);
        let available = width.saturating_sub(prefix.width());
        let text = truncate_to_width(&single_line(&note.text), available);

        match note.created_at {
            Some(created_at) => writeln!(
                out,
                "{}{}  {}",
                prefix,
                text,
                format_time_ago(created_at, now).dimmed()
            )?,
            None => writeln!(out, "{}{}", prefix, text)?,
        }
    }
    Ok(CommandStatus::Success)
}

fn single_line(s: &str) -> String {
    s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceRegistry;
    use std::rc::Rc;

    fn resolver(book: &Rc<NoteBook>) -> ServiceResolver {
        let mut registry = ServiceRegistry::new();
        registry.register_shared(Rc::clone(book));
        registry.build()
    }

    fn run(command: NotesCommand, services: &ServiceResolver) -> (CommandStatus, String) {
        let mut out = Vec::new();
        let status = command.execute(services, &mut out).unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_joins_words() {
        let book = Rc::new(NoteBook::default());
        let services = resolver(&book);

        let (status, output) = run(
            NotesCommand::Add {
                text: vec!["buy".into(), "milk".into()],
            },
            &services,
        );
        assert!(status.is_success());
        assert!(output.contains("Note added."));
        assert_eq!(book.snapshot()[0].text, "buy milk");
    }

    #[test]
    fn list_empty() {
        let book = Rc::new(NoteBook::default());
        let (status, output) = run(NotesCommand::List, &resolver(&book));
        assert!(status.is_success());
        assert_eq!(output, "No notes available.\n");
    }

    #[test]
    fn list_numbers_from_zero() {
        let book = Rc::new(NoteBook::new(vec![
            Note {
                text: "first".into(),
                created_at: None,
            },
            Note {
                text: "second".into(),
                created_at: None,
            },
        ]));
        let (_, output) = run(NotesCommand::List, &resolver(&book));
        assert_eq!(output, "0: first\n1: second\n");
    }

    #[test]
    fn list_honours_configured_width() {
        let book = Rc::new(NoteBook::new(vec![Note {
            text: "abcdefghijklmnop".into(),
            created_at: None,
        }]));
        let mut registry = ServiceRegistry::new();
        registry
            .register_shared(Rc::clone(&book))
            .register_instance(ListSettings { width: 10 });

        let (_, output) = run(NotesCommand::List, &registry.build());
        assert_eq!(output, "0: abcdef…\n");
    }

    #[test]
    fn delete_out_of_range_fails() {
        let book = Rc::new(NoteBook::new(vec![Note::new("only")]));
        let (status, output) = run(NotesCommand::Delete { index: 3 }, &resolver(&book));
        assert_eq!(status, CommandStatus::Failure);
        assert!(output.contains("Please provide a valid note index."));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn edit_replaces_text() {
        let book = Rc::new(NoteBook::new(vec![Note::new("old")]));
        let (status, output) = run(
            NotesCommand::Edit {
                index: 0,
                content: vec!["brand".into(), "new".into()],
            },
            &resolver(&book),
        );
        assert!(status.is_success());
        assert!(output.contains("Note edited."));
        assert_eq!(book.snapshot()[0].text, "brand new");
    }

    #[test]
    fn missing_notebook_is_an_error() {
        let services = ServiceRegistry::new().build();
        let mut out = Vec::new();
        assert!(NotesCommand::List.execute(&services, &mut out).is_err());
    }

    #[test]
    fn only_list_is_read_only() {
        assert!(!NotesCommand::List.mutates());
        assert!(NotesCommand::Delete { index: 0 }.mutates());
    }

    #[test]
    fn truncation_respects_wide_chars() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
    }
}
