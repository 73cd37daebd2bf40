//! # Module Contract
//!
//! A module is a self-contained command surface the shell can enter. The shell
//! only ever sees it through [`CommandModule`]; everything else (its commands,
//! its storage, its configuration) is private to the module.
//!
//! Modules are built by factories (see [`crate::registry`]) from a
//! [`ModuleEnv`]. Each module composes its own store and configuration
//! handles from that environment, so no state is shared between modules.

use crate::error::Result;
use std::io::Write;
use std::path::PathBuf;

pub mod parsing;

pub trait CommandModule {
    /// Unique (case-insensitive) name used by `enter_module`.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn show_help(&self, out: &mut dyn Write) -> Result<()>;

    /// Execute one raw input line. Empty input is a no-op.
    ///
    /// Command-level problems (bad arguments, unknown commands) are reported
    /// by the module on `out`. An `Err` is reserved for unexpected failures;
    /// the router prints it and keeps running.
    fn process_command(&mut self, input: &str, out: &mut dyn Write) -> Result<()>;
}

/// Everything a factory receives to build one module instance.
#[derive(Debug, Clone)]
pub struct ModuleEnv {
    pub data_root: PathBuf,
    /// Name override from the manifest.
    pub name: Option<String>,
    /// Description override from the manifest.
    pub description: Option<String>,
}

impl ModuleEnv {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            name: None,
            description: None,
        }
    }

    pub fn name_or(&self, default: &str) -> String {
        self.name.clone().unwrap_or_else(|| default.to_string())
    }

    pub fn description_or(&self, default: &str) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| default.to_string())
    }
}

/// Outcome of a single module command. Failure corresponds to a non-zero exit
/// code from the command-parsing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

impl CommandStatus {
    pub fn is_success(self) -> bool {
        self == CommandStatus::Success
    }

    pub fn exit_code(self) -> i32 {
        match self {
            CommandStatus::Success => 0,
            CommandStatus::Failure => -1,
        }
    }
}
