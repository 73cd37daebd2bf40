use super::root::{exe_dir, resolve_data_root};
use super::DataStore;
use crate::console::{report_error, report_warning};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed storage: each document is one file directly under the data root.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_root: PathBuf,
}

impl FileStore {
    /// Open a store at `data_root`, creating the directory if needed.
    ///
    /// A directory that cannot be created is reported, not fatal: individual
    /// saves will then fail (and be reported) on their own.
    pub fn open(data_root: impl Into<PathBuf>) -> Self {
        let data_root = data_root.into();
        if !data_root.exists() {
            if let Err(e) = fs::create_dir_all(&data_root) {
                report_error(format!(
                    "Could not create data directory at {}. Error: {}",
                    data_root.display(),
                    e
                ));
            }
        }
        log::debug!("[STORE] Data root: {}", data_root.display());
        Self { data_root }
    }

    /// Open a store at the data root resolved from the executable's location.
    pub fn discover() -> Self {
        let exe_dir = exe_dir();
        let resolution = resolve_data_root(&exe_dir);
        if resolution.used_fallback {
            report_warning(format!(
                "project marker not found. Saving data in {}",
                resolution.data_root.display()
            ));
        }
        Self::open(resolution.data_root)
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.data_root.join(file_name)
    }
}

impl DataStore for FileStore {
    fn read_document(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.path_for(file_name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write_document(&self, file_name: &str, contents: &str) -> Result<()> {
        fs::write(self.path_for(file_name), contents)?;
        Ok(())
    }

    fn location(&self, file_name: &str) -> String {
        self.path_for(file_name).display().to_string()
    }
}
