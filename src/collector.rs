//! Recursive file collection.
//!
//! The collector walks the target directory tree once at the start of a run
//! and materializes a snapshot of every regular file path found. All later
//! decisions act on that snapshot. Entries that cannot be read (permission
//! errors, entries vanishing mid-walk) are reported as warnings and skipped;
//! they never abort the traversal.

use crate::output::OutputFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Gathers every regular file under `base_path`, recursively.
///
/// Traversal order is unspecified. Symlinks are not followed:
/// `DirEntry::file_type` reports them as symlinks and they are ignored, so
/// only plain files are collected.
pub fn gather_files(base_path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(base_path, &mut files);
    files
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            OutputFormatter::warning(&format!("Skipping unreadable directory {}: {}", dir.display(), e));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                OutputFormatter::warning(&format!("Skipping unreadable entry in {}: {}", dir.display(), e));
                continue;
            }
        };

        let path = entry.path();
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => walk(&path, files),
            Ok(file_type) if file_type.is_file() => files.push(path),
            // Symlinks, sockets, and the like are not organized.
            Ok(_) => {}
            Err(e) => {
                OutputFormatter::warning(&format!("Skipping inaccessible file {}: {}", path.display(), e));
            }
        }
    }
}
