//! Two-phase file organization.
//!
//! This module moves files into `YYYY-MM` date folders (Phase A) and then
//! into per-extension subfolders inside every top-level directory (Phase B).
//! It handles directory creation, collision-free moves, and per-file error
//! isolation: a failing file is logged and skipped, the run continues.

use crate::collector;
use crate::config::CompiledFilters;
use crate::date_folder;
use crate::name_resolver;
use crate::output::OutputFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during file organization operations.
#[derive(Debug)]
pub enum OrganizeError {
    /// The base directory path is invalid or doesn't exist.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a date or extension directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read a file's metadata (creation timestamp).
    MetadataUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::MetadataUnavailable { path, source } => {
                write!(
                    f,
                    "Failed to read metadata for {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Counts and skip records accumulated over one full run.
#[derive(Debug, Default)]
pub struct OrganizeSummary {
    /// Files moved into a date folder in Phase A.
    pub date_bucketed: usize,
    /// Files moved into an extension folder in Phase B.
    pub extension_bucketed: usize,
    /// Files left in place because they were already inside a date folder.
    pub already_sorted: usize,
    /// Files left untouched because the filter configuration excluded them.
    pub excluded: usize,
    /// Files skipped due to recoverable errors, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

impl OrganizeSummary {
    /// Total number of files moved across both phases.
    pub fn total_moved(&self) -> usize {
        self.date_bucketed + self.extension_bucketed
    }
}

/// A single predicted move, produced by dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// The outcome of analyzing a directory without mutating it.
#[derive(Debug, Default)]
pub struct OrganizePlan {
    /// Predicted final destinations, ignoring collision suffixes (those can
    /// only be resolved once earlier moves have actually happened).
    pub moves: Vec<PlannedMove>,
    /// Files already at their final location.
    pub already_sorted: usize,
    /// Files the filter configuration excludes.
    pub excluded: usize,
    /// Files whose destination could not be predicted, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Result of moving one file into a directory.
enum MoveOutcome {
    Moved,
    /// The file was already at its destination under its own name.
    InPlace,
}

/// Organizes files by creation month and then by extension.
pub struct Organizer;

impl Organizer {
    /// Runs the full two-phase organization of `base_path`.
    ///
    /// Fatal only when the base path itself does not exist; every per-file
    /// failure is logged, recorded in the summary, and skipped. The operation
    /// is not transactional, but re-running it is safe: Phase A leaves files
    /// already inside a date folder alone, and Phase B treats a file already
    /// at its destination as a no-op.
    pub fn organize(
        base_path: &Path,
        filters: &CompiledFilters,
    ) -> OrganizeResult<OrganizeSummary> {
        Self::validate_base(base_path)?;

        let mut summary = OrganizeSummary::default();
        let snapshot = Self::snapshot(base_path, filters, &mut summary.excluded);

        Self::date_bucket_phase(base_path, &snapshot, &mut summary);
        Self::extension_bucket_phase(base_path, filters, &mut summary);

        Ok(summary)
    }

    /// Predicts where each file would end up, without touching the tree.
    ///
    /// Destinations mirror a real run's final layout
    /// (`<base>/<YYYY-MM>/<extension>/<name>`) except that collision suffixes
    /// are not simulated.
    pub fn plan(base_path: &Path, filters: &CompiledFilters) -> OrganizeResult<OrganizePlan> {
        Self::validate_base(base_path)?;

        let mut plan = OrganizePlan::default();
        let snapshot = Self::snapshot(base_path, filters, &mut plan.excluded);

        for file_path in &snapshot {
            let Some(file_name) = file_path.file_name() else {
                continue;
            };
            let extension =
                date_folder::extension_folder_name(&file_name.to_string_lossy());

            if date_folder::is_already_sorted(file_path, base_path) {
                // Only files sitting directly in the date folder still move
                // (Phase B); anything deeper is final.
                let in_date_folder_root = file_path
                    .strip_prefix(base_path)
                    .map(|rel| rel.components().count() == 2)
                    .unwrap_or(false);

                if in_date_folder_root && let Some(date_dir) = file_path.parent() {
                    plan.moves.push(PlannedMove {
                        source: file_path.clone(),
                        destination: date_dir.join(&extension).join(file_name),
                    });
                } else {
                    plan.already_sorted += 1;
                }
                continue;
            }

            match date_folder::month_folder_name(file_path) {
                Ok(month) => plan.moves.push(PlannedMove {
                    source: file_path.clone(),
                    destination: base_path.join(month).join(&extension).join(file_name),
                }),
                Err(e) => {
                    let error = OrganizeError::MetadataUnavailable {
                        path: file_path.clone(),
                        source: e,
                    };
                    plan.skipped.push((file_path.clone(), error.to_string()));
                }
            }
        }

        Ok(plan)
    }

    /// Fatal precondition: the base directory must exist.
    fn validate_base(base_path: &Path) -> OrganizeResult<()> {
        if !base_path.is_dir() {
            return Err(OrganizeError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path does not exist or is not a directory",
                ),
            });
        }
        Ok(())
    }

    /// Collects the file snapshot for Phase A, applying the filter rules.
    fn snapshot(
        base_path: &Path,
        filters: &CompiledFilters,
        excluded: &mut usize,
    ) -> Vec<PathBuf> {
        let mut snapshot = Vec::new();
        for file_path in collector::gather_files(base_path) {
            if filters.should_include(&file_path) {
                snapshot.push(file_path);
            } else {
                *excluded += 1;
            }
        }
        snapshot
    }

    /// Phase A: move every not-yet-sorted file into its creation-month folder
    /// directly under the base path.
    fn date_bucket_phase(base_path: &Path, snapshot: &[PathBuf], summary: &mut OrganizeSummary) {
        let progress = OutputFormatter::create_progress_bar(snapshot.len() as u64);
        progress.set_message("sorting by month");

        for file_path in snapshot {
            progress.inc(1);

            if date_folder::is_already_sorted(file_path, base_path) {
                summary.already_sorted += 1;
                continue;
            }

            // The folder name is derived once, from the timestamp as read now.
            let month = match date_folder::month_folder_name(file_path) {
                Ok(month) => month,
                Err(e) => {
                    let error = OrganizeError::MetadataUnavailable {
                        path: file_path.clone(),
                        source: e,
                    };
                    Self::record_skip(summary, file_path, error.to_string());
                    continue;
                }
            };

            let date_dir = base_path.join(month);
            if let Err(e) = Self::ensure_directory(&date_dir) {
                Self::record_skip(summary, file_path, e.to_string());
                continue;
            }

            match Self::move_into(&date_dir, file_path) {
                Ok(MoveOutcome::Moved) => summary.date_bucketed += 1,
                Ok(MoveOutcome::InPlace) => {}
                Err(e) => Self::record_skip(summary, file_path, e.to_string()),
            }
        }

        progress.finish_and_clear();
    }

    /// Phase B: inside every direct child directory of the base path, move the
    /// files sitting directly in it into per-extension subfolders.
    ///
    /// The directories are re-listed from disk rather than carried over from
    /// Phase A, so pre-existing date folders (and any other top-level
    /// directory) are extension-sorted too.
    fn extension_bucket_phase(
        base_path: &Path,
        filters: &CompiledFilters,
        summary: &mut OrganizeSummary,
    ) {
        for dir in Self::list_child_dirs(base_path) {
            // Materialize the file list before moving anything out of `dir`.
            for file_path in Self::list_child_files(&dir) {
                if !filters.should_include(&file_path) {
                    continue;
                }

                let Some(file_name) = file_path.file_name() else {
                    continue;
                };
                let extension =
                    date_folder::extension_folder_name(&file_name.to_string_lossy());

                let extension_dir = dir.join(extension);
                if let Err(e) = Self::ensure_directory(&extension_dir) {
                    Self::record_skip(summary, &file_path, e.to_string());
                    continue;
                }

                match Self::move_into(&extension_dir, &file_path) {
                    Ok(MoveOutcome::Moved) => summary.extension_bucketed += 1,
                    Ok(MoveOutcome::InPlace) => {}
                    Err(e) => Self::record_skip(summary, &file_path, e.to_string()),
                }
            }
        }
    }

    /// Moves `file_path` into `directory` under a collision-free name.
    ///
    /// If the file already sits in `directory` under its own name the move is
    /// a no-op; without this guard a re-run would suffix the file against
    /// itself.
    fn move_into(directory: &Path, file_path: &Path) -> OrganizeResult<MoveOutcome> {
        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: directory.to_path_buf(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        if directory.join(file_name) == file_path {
            return Ok(MoveOutcome::InPlace);
        }

        let desired = file_name.to_string_lossy();
        let destination = name_resolver::unique_destination(directory, &desired);

        fs::rename(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(MoveOutcome::Moved)
    }

    /// Creates `path` if it is absent.
    fn ensure_directory(path: &Path) -> OrganizeResult<()> {
        if !path.exists() {
            fs::create_dir(path).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Lists the direct child directories of `base_path`.
    fn list_child_dirs(base_path: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(base_path) {
            Ok(entries) => entries,
            Err(e) => {
                OutputFormatter::warning(&format!(
                    "Skipping unreadable directory {}: {}",
                    base_path.display(),
                    e
                ));
                return Vec::new();
            }
        };

        entries
            .flatten()
            .filter(|entry| {
                entry
                    .file_type()
                    .map(|file_type| file_type.is_dir())
                    .unwrap_or(false)
            })
            .map(|entry| entry.path())
            .collect()
    }

    /// Lists the regular files sitting directly inside `dir`.
    fn list_child_files(dir: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                OutputFormatter::warning(&format!(
                    "Skipping unreadable directory {}: {}",
                    dir.display(),
                    e
                ));
                return Vec::new();
            }
        };

        entries
            .flatten()
            .filter(|entry| {
                entry
                    .file_type()
                    .map(|file_type| file_type.is_file())
                    .unwrap_or(false)
            })
            .map(|entry| entry.path())
            .collect()
    }

    /// Logs a recoverable per-file failure and records it in the summary.
    fn record_skip(summary: &mut OrganizeSummary, file_path: &Path, reason: String) {
        OutputFormatter::warning(&format!("Skipping {}: {}", file_path.display(), reason));
        summary.skipped.push((file_path.to_path_buf(), reason));
    }
}
