//! # Storage Layer
//!
//! Modules persist their state as named JSON documents inside a single shared
//! data root. The [`DataStore`] trait abstracts over where those documents live.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one file per document under the
//!   data root (see [`root`] for how that directory is located)
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!
//! ## Failure Semantics
//!
//! The raw methods (`read_document`, `write_document`) and the `try_*` helpers
//! return errors. [`DataStore::load`] and [`DataStore::save`] never do: they
//! print the problem and carry on, so a missing or corrupt file yields the
//! empty state and a failed save leaves the shell running.
//!
//! ```text
//! modules_data/
//! ├── config.json     # Configuration document (read-only at runtime)
//! └── notes.json      # One document per module data file
//! ```

use crate::console::report_error;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs;
pub mod memory;
pub mod root;

/// Abstract interface for named document storage.
pub trait DataStore {
    /// Read a document. `Ok(None)` means the document does not exist yet.
    fn read_document(&self, file_name: &str) -> Result<Option<String>>;

    /// Write a document, replacing previous content.
    fn write_document(&self, file_name: &str, contents: &str) -> Result<()>;

    /// Human-readable location of a document, used in messages.
    fn location(&self, file_name: &str) -> String;

    fn try_load<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.read_document(file_name)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load a document, treating "missing" and "unreadable" alike.
    fn load<T: DeserializeOwned>(&self, file_name: &str) -> Option<T>
    where
        Self: Sized,
    {
        match self.try_load(file_name) {
            Ok(value) => value,
            Err(e) => {
                report_error(format!(
                    "Error loading data from {}: {}",
                    self.location(file_name),
                    e
                ));
                None
            }
        }
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, file_name: &str) -> T
    where
        Self: Sized,
    {
        self.load(file_name).unwrap_or_default()
    }

    fn try_save<T: Serialize + ?Sized>(&self, file_name: &str, data: &T) -> Result<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string_pretty(data)?;
        self.write_document(file_name, &json)
    }

    /// Save a document. Returns whether the write went through.
    fn save<T: Serialize + ?Sized>(&self, file_name: &str, data: &T) -> bool
    where
        Self: Sized,
    {
        match self.try_save(file_name, data) {
            Ok(()) => true,
            Err(e) => {
                report_error(format!(
                    "Error saving data to {}: {}",
                    self.location(file_name),
                    e
                ));
                false
            }
        }
    }
}
