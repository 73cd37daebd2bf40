//! # Module Loader
//!
//! Scans the modules directory once at startup and instantiates every module
//! the manifests in it describe.
//!
//! ## Manifests
//!
//! Each `*.toml` file directly inside the directory is one extension file:
//!
//! ```toml
//! [[module]]
//! kind = "notes"              # factory entry point, see registry.rs
//! name = "Work"               # optional override
//! description = "Work notes"  # optional override
//! ```
//!
//! ## Failure Isolation
//!
//! Files are processed in file-name order and never abort the scan:
//!
//! - unreadable or malformed manifest: one failure, no modules
//! - any entry naming an unknown kind: one failure, no modules
//! - a factory error or duplicate name: one failure for that entry, the other
//!   entries of the file still load
//!
//! A missing directory is not an error and yields an empty result.

use crate::console::CmdMessage;
use crate::error::{Result, ShellError};
use crate::module::{CommandModule, ModuleEnv};
use crate::registry::{ModuleFactories, ModuleFactory};
use crate::store::root::exe_dir;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const MODULES_DIR_NAME: &str = "modules";
pub const MANIFEST_EXTENSION: &str = "toml";

pub fn default_modules_dir() -> PathBuf {
    exe_dir().join(MODULES_DIR_NAME)
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleManifest {
    #[serde(default, rename = "module")]
    pub modules: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub kind: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ModuleManifest {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub file_name: String,
    pub message: String,
}

#[derive(Default)]
pub struct ModuleLoadResult {
    pub modules: Vec<Box<dyn CommandModule>>,
    pub failures: Vec<LoadFailure>,
}

impl ModuleLoadResult {
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.failures.is_empty()
    }

    /// One line per loaded module, then one per failure.
    pub fn report(&self) -> Vec<CmdMessage> {
        let loaded = self
            .modules
            .iter()
            .map(|m| CmdMessage::success(format!("Loaded module: {}", m.name())));
        let failed = self.failures.iter().map(|f| {
            CmdMessage::error(format!(
                "Failed to load module from {}: {}",
                f.file_name, f.message
            ))
        });
        loaded.chain(failed).collect()
    }

    fn has_module(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.modules.iter().any(|m| m.name().to_lowercase() == name)
    }

    fn fail(&mut self, file_name: &str, error: impl fmt::Display) {
        let message = error.to_string();
        log::debug!(
            "[MODULE] Failed to load module from {}: {}",
            file_name,
            message
        );
        self.failures.push(LoadFailure {
            file_name: file_name.to_string(),
            message,
        });
    }
}

impl fmt::Debug for ModuleLoadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleLoadResult")
            .field("modules", &self.module_names())
            .field("failures", &self.failures)
            .finish()
    }
}

pub struct ModuleLoader {
    factories: ModuleFactories,
    data_root: PathBuf,
}

impl ModuleLoader {
    pub fn new(factories: ModuleFactories, data_root: impl Into<PathBuf>) -> Self {
        Self {
            factories,
            data_root: data_root.into(),
        }
    }

    pub fn load_modules(&self, dir: &Path) -> ModuleLoadResult {
        let mut result = ModuleLoadResult::default();

        if !dir.is_dir() {
            log::debug!(
                "[MODULE] Modules directory does not exist: {}",
                dir.display()
            );
            return result;
        }

        let files = match candidate_files(dir) {
            Ok(files) => files,
            Err(e) => {
                result.fail(&dir.display().to_string(), e);
                return result;
            }
        };

        for path in files {
            self.load_file(&path, &mut result);
        }

        result
    }

    fn load_file(&self, path: &Path, result: &mut ModuleLoadResult) {
        let file_name = display_name(path);
        log::debug!("[MODULE] Scanning {}", path.display());

        let manifest = match ModuleManifest::from_file(path) {
            Ok(manifest) => manifest,
            Err(e) => return result.fail(&file_name, e),
        };

        let resolved = match self.resolve_entries(manifest) {
            Ok(resolved) => resolved,
            Err(e) => return result.fail(&file_name, e),
        };

        for (factory, entry) in resolved {
            let env = ModuleEnv {
                data_root: self.data_root.clone(),
                name: entry.name,
                description: entry.description,
            };

            match factory(&env) {
                Ok(module) if result.has_module(module.name()) => {
                    let message = format!("Duplicate module name: {}", module.name());
                    result.fail(&file_name, message);
                }
                Ok(module) => {
                    log::info!(
                        "[MODULE] Loaded {} ({}) from {}",
                        module.name(),
                        entry.kind,
                        file_name
                    );
                    result.modules.push(module);
                }
                Err(e) => result.fail(&file_name, e),
            }
        }
    }

    /// Match every entry to its factory before constructing anything, so a
    /// manifest naming an unknown kind loads nothing at all.
    fn resolve_entries(
        &self,
        manifest: ModuleManifest,
    ) -> Result<Vec<(&ModuleFactory, ManifestEntry)>> {
        manifest
            .modules
            .into_iter()
            .map(|entry| match self.factories.get(&entry.kind) {
                Some(factory) => Ok((factory, entry)),
                None => Err(ShellError::UnknownModuleKind(entry.kind)),
            })
            .collect()
    }
}

/// Manifest files directly inside `dir`, sorted by file name.
fn candidate_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_manifest = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION));
        if path.is_file() && is_manifest {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
