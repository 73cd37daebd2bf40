use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Workspace {
    _temp: TempDir,
    modules: std::path::PathBuf,
    data: std::path::PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let modules = temp.path().join("modules");
        let data = temp.path().join("data");
        fs::create_dir_all(&modules).unwrap();
        Self {
            _temp: temp,
            modules,
            data,
        }
    }

    fn with_manifest(self, file_name: &str, content: &str) -> Self {
        fs::write(self.modules.join(file_name), content).unwrap();
        self
    }

    fn with_notes(self) -> Self {
        self.with_manifest("notes.toml", "[[module]]\nkind = \"notes\"\n")
    }

    fn shell(&self, script: &str) -> assert_cmd::assert::Assert {
        shell_at(&self.modules, &self.data, script)
    }
}

fn shell_at(modules: &Path, data: &Path, script: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("modsh")
        .unwrap()
        .env_remove("MODSH_MODULES_DIR")
        .env_remove("MODSH_DATA_DIR")
        .arg("--modules-dir")
        .arg(modules)
        .arg("--data-dir")
        .arg(data)
        .write_stdin(script)
        .assert()
}

#[test]
fn missing_modules_directory_lists_nothing() {
    let temp = tempfile::tempdir().unwrap();
    shell_at(
        &temp.path().join("does-not-exist"),
        &temp.path().join("data"),
        "modules\nexit\n",
    )
    .success()
    .stdout(predicate::str::contains("Modules directory not found."))
    .stdout(predicate::str::contains("No modules found."));
}

#[test]
fn empty_modules_directory_lists_nothing() {
    Workspace::new()
        .shell("modules\nexit\n")
        .success()
        .stdout(predicate::str::contains("No modules found."))
        .stdout(predicate::str::contains("Modules directory not found.").not());
}

#[test]
fn loads_notes_module_and_reports_it() {
    Workspace::new()
        .with_notes()
        .shell("modules\nexit\n")
        .success()
        .stdout(predicate::str::contains("Loaded module: Notes"))
        .stdout(predicate::str::contains(
            "A module to manage personal notes.",
        ));
}

#[test]
fn bad_manifest_does_not_stop_startup() {
    Workspace::new()
        .with_notes()
        .with_manifest("broken.toml", "[[module]\n")
        .with_manifest("unknown.toml", "[[module]]\nkind = \"weather\"\n")
        .shell("modules\nexit\n")
        .success()
        .stdout(predicate::str::contains(
            "Failed to load module from broken.toml",
        ))
        .stdout(predicate::str::contains(
            "Failed to load module from unknown.toml: Unknown module kind: weather",
        ))
        .stdout(predicate::str::contains("Loaded module: Notes"));
}

#[test]
fn enter_module_shows_help_and_prompt() {
    Workspace::new()
        .with_notes()
        .shell("enter_module notes\nmodule_exit\nexit\n")
        .success()
        .stdout(predicate::str::contains("Entering module: Notes"))
        .stdout(predicate::str::contains("Adds a new note."))
        .stdout(predicate::str::contains("Notes> "))
        .stdout(predicate::str::contains("Exiting Notes module."));
}

#[test]
fn enter_unknown_module() {
    Workspace::new()
        .with_notes()
        .shell("enter_module Nope\nexit\n")
        .success()
        .stdout(predicate::str::contains("Module not found."))
        .stdout(predicate::str::contains("Nope> ").not());
}

#[test]
fn notes_persist_across_sessions() {
    let workspace = Workspace::new().with_notes();

    workspace
        .shell("enter_module Notes\nadd buy milk\nadd call mom\ndelete 0\nexit\nexit\n")
        .success()
        .stdout(predicate::str::contains("Note added."))
        .stdout(predicate::str::contains("Note deleted."));

    let saved = fs::read_to_string(workspace.data.join("notes.json")).unwrap();
    assert!(saved.contains("call mom"));
    assert!(!saved.contains("buy milk"));

    workspace
        .shell("enter_module Notes\nlist\nexit\nexit\n")
        .success()
        .stdout(predicate::str::contains("0: call mom"));
}

#[test]
fn module_exit_wins_over_module_commands() {
    Workspace::new()
        .with_notes()
        .shell("enter_module Notes\nmodule_exit\nadd not a note\nexit\n")
        .success()
        .stdout(predicate::str::contains("Unknown command. Type 'help'."))
        .stdout(predicate::str::contains("Note added.").not());
}

#[test]
fn configured_data_file_is_used() {
    let workspace = Workspace::new().with_notes();
    fs::create_dir_all(&workspace.data).unwrap();
    fs::write(
        workspace.data.join("config.json"),
        r#"{"Notes": {"DataFile": "journal.json"}}"#,
    )
    .unwrap();

    workspace
        .shell("enter_module Notes\nadd hello\nexit\nexit\n")
        .success();

    assert!(workspace.data.join("journal.json").is_file());
    assert!(!workspace.data.join("notes.json").exists());
}

#[test]
fn corrupt_notes_file_starts_empty() {
    let workspace = Workspace::new().with_notes();
    fs::create_dir_all(&workspace.data).unwrap();
    fs::write(workspace.data.join("notes.json"), "not json").unwrap();

    workspace
        .shell("enter_module Notes\nlist\nexit\nexit\n")
        .success()
        .stdout(predicate::str::contains("No notes available."))
        .stderr(predicate::str::contains("Error loading data from"));
}

#[test]
fn end_of_input_exits_cleanly() {
    Workspace::new()
        .with_notes()
        .shell("enter_module Notes\n")
        .success();
}
