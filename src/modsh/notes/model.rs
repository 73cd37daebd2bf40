use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredNote")]
pub struct Note {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: Some(Utc::now()),
        }
    }
}

/// On-disk shapes: current notes are objects, older files hold bare strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredNote {
    Plain(String),
    Full {
        text: String,
        #[serde(default)]
        created_at: Option<DateTime<Utc>>,
    },
}

impl From<StoredNote> for Note {
    fn from(stored: StoredNote) -> Self {
        match stored {
            StoredNote::Plain(text) => Note {
                text,
                created_at: None,
            },
            StoredNote::Full { text, created_at } => Note { text, created_at },
        }
    }
}

/// The notes list shared between a module and its command handlers.
#[derive(Debug, Default)]
pub struct NoteBook {
    notes: RefCell<Vec<Note>>,
}

impl NoteBook {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes: RefCell::new(notes),
        }
    }

    pub fn add(&self, note: Note) {
        self.notes.borrow_mut().push(note);
    }

    /// Replace the text of the note at `index`. Returns false if out of range.
    pub fn edit(&self, index: usize, text: String) -> bool {
        match self.notes.borrow_mut().get_mut(index) {
            Some(note) => {
                note.text = text;
                true
            }
            None => false,
        }
    }

    pub fn delete(&self, index: usize) -> Option<Note> {
        let mut notes = self.notes.borrow_mut();
        if index < notes.len() {
            Some(notes.remove(index))
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.notes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_legacy_string_lists() {
        let notes: Vec<Note> = serde_json::from_str(r#"["milk", "eggs"]"#).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "milk");
        assert!(notes[0].created_at.is_none());
    }

    #[test]
    fn reads_mixed_entries() {
        let json = r#"[
            "legacy",
            {"text": "modern", "created_at": "2024-01-15T14:30:00Z"},
            {"text": "undated"}
        ]"#;
        let notes: Vec<Note> = serde_json::from_str(json).unwrap();
        assert_eq!(notes[1].text, "modern");
        assert!(notes[1].created_at.is_some());
        assert_eq!(notes[2].created_at, None);
    }

    #[test]
    fn undated_note_omits_timestamp() {
        let note = Note {
            text: "x".into(),
            created_at: None,
        };
        assert_eq!(serde_json::to_string(&note).unwrap(), r#"{"text":"x"}"#);
    }

    #[test]
    fn edit_and_delete_respect_bounds() {
        let book = NoteBook::new(vec![Note::new("a"), Note::new("b")]);
        assert!(book.edit(1, "B".into()));
        assert!(!book.edit(2, "C".into()));
        assert_eq!(book.delete(0).map(|n| n.text), Some("a".to_string()));
        assert!(book.delete(5).is_none());
        assert_eq!(book.snapshot()[0].text, "B");
        assert_eq!(book.len(), 1);
    }
}
