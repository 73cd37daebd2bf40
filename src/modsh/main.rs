use clap::Parser;
use modsh::console::{write_message, write_messages, CmdMessage};
use modsh::error::Result;
use modsh::loader::{default_modules_dir, ModuleLoader};
use modsh::registry::ModuleFactories;
use modsh::shell::Shell;
use modsh::store::fs::FileStore;
use std::io::{self, Write};

mod args;
use args::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = match cli.data_dir {
        Some(dir) => FileStore::open(dir),
        None => FileStore::discover(),
    };
    let modules_dir = cli.modules_dir.unwrap_or_else(default_modules_dir);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !modules_dir.is_dir() {
        write_message(
            &mut out,
            &CmdMessage::warning("Modules directory not found."),
        )?;
    }

    let loader = ModuleLoader::new(ModuleFactories::builtin(), store.data_root());
    let result = loader.load_modules(&modules_dir);
    write_messages(&mut out, &result.report())?;

    let mut shell = Shell::new(result.modules);
    writeln!(out, "Welcome to modsh. Type 'help' for commands.")?;

    shell.run(io::stdin().lock(), out)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
