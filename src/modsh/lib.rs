//! # modsh Architecture
//!
//! modsh is an interactive shell whose commands come from pluggable
//! **modules**. The shell itself only knows how to list modules, enter one and
//! leave it again; everything else is delegated.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell Router (shell.rs, wired by main.rs)                  │
//! │  - Reads lines, prints prompts                              │
//! │  - Shell commands vs. active-module input                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Module Loader (loader.rs + registry.rs)                    │
//! │  - Scans the modules directory for manifests                │
//! │  - Instantiates modules through registered factories        │
//! │  - Isolates failures per manifest file                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Modules (module/, notes/)                                  │
//! │  - CommandModule contract                                   │
//! │  - clap-parsed commands, state handed over via services.rs  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage and Configuration (store/, config.rs)              │
//! │  - Named JSON documents under one data root                 │
//! │  - Read-only `a:b:c` lookups into config.json               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//!
//! Nothing short of `exit` stops the shell. Broken manifests are recorded in
//! the load result, unreadable data files load as empty, failed saves are
//! printed, and errors escaping a module are printed by the router.
//!
//! ## Module Overview
//!
//! - [`shell`]: The read-evaluate-print loop and routing rules
//! - [`loader`]: Manifest discovery and module instantiation
//! - [`registry`]: Factories by module kind
//! - [`module`]: The module contract and clap input parsing
//! - [`services`]: Typed service container for command handlers
//! - [`store`]: Document storage and data root resolution
//! - [`config`]: Configuration lookups
//! - [`notes`]: The built-in notes module
//! - [`console`]: Coloured user messages
//! - [`error`]: Error types

pub mod config;
pub mod console;
pub mod error;
pub mod loader;
pub mod module;
pub mod notes;
pub mod registry;
pub mod services;
pub mod shell;
pub mod store;
