//! Collision-free destination name resolution.
//!
//! Given a destination directory and a desired file name, returns a name that
//! does not collide with any existing entry in that directory at the time of
//! the call. The existence check and the eventual move are not atomic, so
//! this is not safe under concurrent writers to the same directory; for a
//! single-user, single-process tool that race is accepted.

use std::path::{Path, PathBuf};

/// Returns a name unique within `directory`, starting from `desired_name`.
///
/// If `desired_name` is free it is returned unchanged. Otherwise the name is
/// split into stem and extension and `stem_1.ext`, `stem_2.ext`, ... are
/// probed in increasing order until a free slot is found.
pub fn unique_file_name(directory: &Path, desired_name: &str) -> String {
    if !directory.join(desired_name).exists() {
        return desired_name.to_string();
    }

    let (stem, extension) = split_name(desired_name);
    let mut counter: u32 = 1;
    loop {
        let candidate = match extension {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        if !directory.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Convenience wrapper returning the full destination path.
pub fn unique_destination(directory: &Path, desired_name: &str) -> PathBuf {
    directory.join(unique_file_name(directory, desired_name))
}

/// Splits a file name into stem and extension at the last `.`.
///
/// Names without a `.` (or with only a leading one) have no extension and the
/// suffix is appended to the whole name.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}
