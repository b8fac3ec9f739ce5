//! Input discovery for directory mode.

use crate::error::{ConvertError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension matched when none is configured.
pub const DEFAULT_EXTENSION: &str = "qif";

/// Recursively collects files under `root` whose extension is `extension`.
///
/// Entries whose name starts with `.` are skipped along with everything
/// beneath them; `root` itself is always searched. Matching is ASCII
/// case-insensitive and the result is sorted by path.
pub fn find_qif_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, extension, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| discovery_error(dir, source))?;

    for entry in entries {
        let entry = entry.map_err(|source| discovery_error(dir, source))?;
        let path = entry.path();

        if is_hidden(&path) {
            debug!("Skipping hidden entry {}", path.display());
            continue;
        }

        let file_type = entry
            .file_type()
            .map_err(|source| discovery_error(&path, source))?;

        if file_type.is_dir() {
            walk(&path, extension, found)?;
        } else if has_extension(&path, extension) {
            found.push(path);
        }
    }

    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

fn discovery_error(path: &Path, source: std::io::Error) -> ConvertError {
    ConvertError::Discovery {
        path: path.to_path_buf(),
        source,
    }
}
