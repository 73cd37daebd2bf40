//! Notes module: a persistent, ordered list of short text notes.
//!
//! Notes live in `<name>.json` in the data root (so `notes.json` for the
//! default module) unless the configuration sets `"<Name>:DataFile"`.
//! `"<Name>:ListWidth"` controls how wide `list` output may get.

use crate::config::ConfigService;
use crate::console::{write_message, CmdMessage};
use crate::error::{Result, ShellError};
use crate::module::parsing::{parse_line, render_help, ParseOutcome};
use crate::module::{CommandModule, ModuleEnv};
use crate::services::{ServiceRegistry, ServiceResolver};
use crate::store::fs::FileStore;
use crate::store::DataStore;
use std::io::Write;
use std::rc::Rc;

pub mod commands;
pub mod model;

pub use commands::{ListSettings, NotesCli, NotesCommand};
pub use model::{Note, NoteBook};

pub const KIND: &str = "notes";
pub const DEFAULT_NAME: &str = "Notes";
pub const DEFAULT_DESCRIPTION: &str = "A module to manage personal notes.";

/// Factory entry point registered under [`KIND`].
pub fn create(env: &ModuleEnv) -> Result<Box<dyn CommandModule>> {
    let name = env.name_or(DEFAULT_NAME);
    if name.trim().is_empty() {
        return Err(ShellError::Module(
            "module name cannot be empty".to_string(),
        ));
    }

    let store = FileStore::open(env.data_root.clone());
    let config = ConfigService::load(&store);
    let module = NotesModule::new(
        name,
        env.description_or(DEFAULT_DESCRIPTION),
        store,
        config,
    );
    Ok(Box::new(module))
}

pub struct NotesModule<S: DataStore> {
    name: String,
    description: String,
    store: S,
    data_file: String,
    notes: Rc<NoteBook>,
    services: ServiceResolver,
}

impl<S: DataStore> NotesModule<S> {
    pub fn new(name: String, description: String, store: S, config: ConfigService) -> Self {
        let data_file = config.get_value_or(
            &format!("{}:DataFile", name),
            &format!("{}.json", name.to_lowercase()),
        );
        let list_settings = config
            .get_value(&format!("{}:ListWidth", name))
            .and_then(|width| width.parse().ok())
            .map(|width| ListSettings { width })
            .unwrap_or_default();

        let notes = Rc::new(NoteBook::new(store.load_or_default(&data_file)));

        let mut registry = ServiceRegistry::new();
        registry
            .register_shared(Rc::clone(&notes))
            .register_instance(list_settings);

        Self {
            name,
            description,
            store,
            data_file,
            notes,
            services: registry.build(),
        }
    }

    pub fn data_file(&self) -> &str {
        &self.data_file
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn save(&self) {
        self.store.save(&self.data_file, &self.notes.snapshot());
    }
}

impl<S: DataStore> CommandModule for NotesModule<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn show_help(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", render_help::<NotesCli>().trim_end())?;
        Ok(())
    }

    fn process_command(&mut self, input: &str, out: &mut dyn Write) -> Result<()> {
        match parse_line::<NotesCli>(input) {
            ParseOutcome::Empty => {}
            ParseOutcome::Help(text) => writeln!(out, "{}", text.trim_end())?,
            ParseOutcome::Invalid(message) => {
                write_message(out, &CmdMessage::error(message.trim_end()))?
            }
            ParseOutcome::Command(cli) => {
                let mutates = cli.command.mutates();
                let status = cli.command.execute(&self.services, out)?;
                log::debug!("[NOTES] command finished with code {}", status.exit_code());
                if status.is_success() && mutates {
                    self.save();
                }
            }
        }
        Ok(())
    }
}
