//! Read-only configuration backed by `config.json` in the data root.
//!
//! Keys are colon-delimited paths into the document, e.g. `"Notes:DataFile"`
//! addresses `{"Notes": {"DataFile": "..."}}`. Only scalar leaves produce a
//! value: objects, arrays and `null` read as absent.

use crate::console::report_warning;
use crate::store::DataStore;
use serde_json::Value;

pub const CONFIG_FILENAME: &str = "config.json";
pub const KEY_SEPARATOR: char = ':';

#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    root: Option<Value>,
}

impl ConfigService {
    /// Load the configuration snapshot. Never fails: a missing document is
    /// silent, an unreadable one is reported, and both leave every lookup absent.
    pub fn load<S: DataStore>(store: &S) -> Self {
        match store.try_load::<Value>(CONFIG_FILENAME) {
            Ok(root) => {
                if root.is_none() {
                    log::debug!("[CONFIG] No {} found", CONFIG_FILENAME);
                }
                Self { root }
            }
            Err(e) => {
                report_warning(format!("Could not load {}. {}", CONFIG_FILENAME, e));
                Self { root: None }
            }
        }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root: Some(root) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.root.is_some()
    }

    pub fn get_value(&self, key: &str) -> Option<String> {
        let mut node = self.root.as_ref()?;

        for part in key.split(KEY_SEPARATOR) {
            node = node.as_object()?.get(part)?;
        }

        match node {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn get_value_or(&self, key: &str, default: &str) -> String {
        self.get_value(key).unwrap_or_else(|| default.to_string())
    }
}
