use super::DataStore;
use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage for testing.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: RefCell<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document, bypassing serialization.
    pub fn with_document(self, file_name: &str, contents: &str) -> Self {
        self.documents
            .borrow_mut()
            .insert(file_name.to_string(), contents.to_string());
        self
    }

    pub fn raw(&self, file_name: &str) -> Option<String> {
        self.documents.borrow().get(file_name).cloned()
    }
}

impl DataStore for InMemoryStore {
    fn read_document(&self, file_name: &str) -> Result<Option<String>> {
        Ok(self.raw(file_name))
    }

    fn write_document(&self, file_name: &str, contents: &str) -> Result<()> {
        self.documents
            .borrow_mut()
            .insert(file_name.to_string(), contents.to_string());
        Ok(())
    }

    fn location(&self, file_name: &str) -> String {
        format!("memory:{}", file_name)
    }
}
