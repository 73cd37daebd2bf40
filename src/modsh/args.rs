use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modsh", version)]
#[command(about = "Extensible command shell with pluggable modules", long_about = None)]
pub struct Cli {
    /// Directory scanned for module manifests (defaults to `modules` next to the executable)
    #[arg(long, env = "MODSH_MODULES_DIR", value_name = "DIR")]
    pub modules_dir: Option<PathBuf>,

    /// Data directory, skipping the search for the project root
    #[arg(long, env = "MODSH_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
