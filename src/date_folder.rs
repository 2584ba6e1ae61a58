//! Date folder naming and sort-state classification.
//!
//! A date folder is a directory named `YYYY-MM` (creation month of the files
//! inside it) sitting directly under the organization root. This module derives
//! that name from a file's creation timestamp and decides whether a file is
//! already inside a date folder, which is what makes re-running the organizer
//! idempotent.

use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

/// Directory name used for files whose name carries no extension.
pub const NO_EXTENSION_DIR: &str = "no_extension";

/// Anchored pattern for a date folder name: four digits, hyphen, two digits.
fn date_folder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("date folder pattern is valid"))
}

/// Returns true if `name` has the exact shape of a date folder name
/// (length 7, hyphen at index 4, all other characters decimal digits).
pub fn is_date_folder_name(name: &str) -> bool {
    date_folder_pattern().is_match(name)
}

/// Reads a file's creation timestamp and formats it as a `YYYY-MM` folder name
/// in the host's local time zone.
///
/// Filesystems that do not record a creation time fall back to the
/// modification time, mirroring what `ctime` degrades to on those platforms.
pub fn month_folder_name(file_path: &Path) -> io::Result<String> {
    let metadata = fs::metadata(file_path)?;
    let timestamp = metadata.created().or_else(|_| metadata.modified())?;
    let local: DateTime<Local> = timestamp.into();
    Ok(local.format("%Y-%m").to_string())
}

/// Decides whether `file_path` already lives inside a date folder that is a
/// direct child of `base_path`.
///
/// The check is purely path-shape based: the first segment of the path
/// relative to the base must match the date folder pattern, and there must be
/// at least one further segment (the file itself is never the date folder).
/// Files for which no relative path can be computed are treated as unsorted.
pub fn is_already_sorted(file_path: &Path, base_path: &Path) -> bool {
    let Ok(relative) = file_path.strip_prefix(base_path) else {
        return false;
    };

    let mut segments = relative.components();
    let Some(first) = segments.next() else {
        return false;
    };

    // The date folder must not be the final segment.
    if segments.next().is_none() {
        return false;
    }

    first
        .as_os_str()
        .to_str()
        .is_some_and(is_date_folder_name)
}

/// Derives the extension bucket name for a file: the text after the last `.`
/// of the file name, case preserved, or [`NO_EXTENSION_DIR`] when absent.
///
/// Note: a file literally carrying the extension `no_extension` shares a
/// bucket with extensionless files. That ambiguity is inherited behavior and
/// is deliberately left unresolved.
pub fn extension_folder_name(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_string())
        .unwrap_or_else(|| NO_EXTENSION_DIR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_valid_date_folder_names() {
        assert!(is_date_folder_name("2024-03"));
        assert!(is_date_folder_name("1999-12"));
        assert!(is_date_folder_name("2024-00")); // Shape only, not a calendar check
    }

    #[test]
    fn test_invalid_date_folder_names() {
        assert!(!is_date_folder_name("2024-3"));
        assert!(!is_date_folder_name("2024_03"));
        assert!(!is_date_folder_name("2024-003"));
        assert!(!is_date_folder_name("a024-03"));
        assert!(!is_date_folder_name("2024-03/"));
        assert!(!is_date_folder_name(""));
        assert!(!is_date_folder_name("photos"));
    }

    #[test]
    fn test_already_sorted_file_in_date_folder() {
        let base = Path::new("/downloads");
        assert!(is_already_sorted(
            Path::new("/downloads/2024-03/photo.jpg"),
            base
        ));
        // Depth below the date folder does not matter.
        assert!(is_already_sorted(
            Path::new("/downloads/2024-03/jpg/photo.jpg"),
            base
        ));
    }

    #[test]
    fn test_not_sorted_outside_date_folder() {
        let base = Path::new("/downloads");
        assert!(!is_already_sorted(Path::new("/downloads/photo.jpg"), base));
        assert!(!is_already_sorted(
            Path::new("/downloads/vacation/photo.jpg"),
            base
        ));
    }

    #[test]
    fn test_date_folder_itself_is_not_sorted() {
        let base = Path::new("/downloads");
        assert!(!is_already_sorted(Path::new("/downloads/2024-03"), base));
    }

    #[test]
    fn test_file_outside_base_is_not_sorted() {
        let base = Path::new("/downloads");
        assert!(!is_already_sorted(Path::new("/other/2024-03/file.txt"), base));
    }

    #[test]
    fn test_month_folder_name_of_fresh_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("fresh.txt");
        File::create(&file_path).expect("Failed to create file");

        let name = month_folder_name(&file_path).expect("Failed to read timestamp");
        let expected = Local::now().format("%Y-%m").to_string();
        assert_eq!(name, expected);
        assert!(is_date_folder_name(&name));
    }

    #[test]
    fn test_month_folder_name_missing_file() {
        let result = month_folder_name(Path::new("/non/existent/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_extension_folder_name() {
        assert_eq!(extension_folder_name("photo.jpg"), "jpg");
        assert_eq!(extension_folder_name("archive.tar.gz"), "gz");
        assert_eq!(extension_folder_name("README"), NO_EXTENSION_DIR);
        assert_eq!(extension_folder_name("notes."), NO_EXTENSION_DIR);
    }

    #[test]
    fn test_extension_case_is_preserved() {
        assert_eq!(extension_folder_name("SCAN.PDF"), "PDF");
    }

    #[test]
    fn test_literal_no_extension_extension_shares_bucket() {
        // Inherited ambiguity: both land in the same bucket.
        assert_eq!(extension_folder_name("weird.no_extension"), NO_EXTENSION_DIR);
        assert_eq!(extension_folder_name("plain"), NO_EXTENSION_DIR);
    }
}
