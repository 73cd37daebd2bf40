//! Locating the data root.
//!
//! The data root is anchored to the checkout the binary was built in: starting
//! from the executable's directory we walk upward until a directory holds the
//! marker file. Installed binaries with no checkout above them keep their data
//! next to the executable instead.

use std::path::{Path, PathBuf};

/// Marker identifying the root of a Rust workspace checkout.
pub const MARKER_FILE: &str = "Cargo.lock";

/// Subfolder of the base directory that holds all data documents.
pub const DATA_DIR_NAME: &str = "modules_data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootResolution {
    pub data_root: PathBuf,
    pub used_fallback: bool,
}

/// Walk up from `start` (inclusive) and return the first directory accepted
/// by `is_marker`. Returns None once the filesystem root has been checked.
pub fn find_marker_root<F>(start: &Path, is_marker: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let mut current = start.to_path_buf();

    loop {
        if is_marker(&current) {
            return Some(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

pub fn has_marker_file(dir: &Path) -> bool {
    dir.join(MARKER_FILE).is_file()
}

/// Resolve the data root for a binary living in `exe_dir`.
pub fn resolve_data_root(exe_dir: &Path) -> RootResolution {
    match find_marker_root(exe_dir, has_marker_file) {
        Some(base) => RootResolution {
            data_root: base.join(DATA_DIR_NAME),
            used_fallback: false,
        },
        None => RootResolution {
            data_root: exe_dir.join(DATA_DIR_NAME),
            used_fallback: true,
        },
    }
}

/// Directory containing the running executable, or the working directory if
/// that cannot be determined.
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
