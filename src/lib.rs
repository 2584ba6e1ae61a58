//! datetidy - sort a directory tree by creation month and file extension
//!
//! This library gathers every file under a target directory, moves each one
//! into a `YYYY-MM` folder named after its creation month, and then sorts the
//! contents of every top-level folder into per-extension subfolders. Re-runs
//! are idempotent: files already inside a date folder keep their bucket, and
//! files already at their final location are left alone.

pub mod cli;
pub mod collector;
pub mod config;
pub mod date_folder;
pub mod name_resolver;
pub mod organizer;
pub mod output;

pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use organizer::{OrganizeError, OrganizePlan, OrganizeResult, OrganizeSummary, Organizer};

pub use cli::{run_cli, run_cli_with_config};
