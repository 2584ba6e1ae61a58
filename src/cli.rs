//! CLI orchestration.
//!
//! Glue between the command line and the organizer: loads the filter
//! configuration, validates the target directory, runs the organization (or
//! its dry run), and presents the outcome on the console. A completed run is
//! reported as a success even when individual files were skipped; skips are
//! only visible as warnings.

use crate::config::FilterConfig;
use crate::organizer::{OrganizePlan, OrganizeSummary, Organizer};
use crate::output::OutputFormatter;
use std::collections::HashMap;
use std::path::Path;

/// Runs the full organize operation (or a dry run) on `dir_path`.
///
/// Uses the implicit configuration lookup order; see
/// [`run_cli_with_config`] to pin a configuration file.
pub fn run_cli(dir_path: &Path, dry_run: bool) -> Result<(), String> {
    run_cli_with_config(dir_path, dry_run, None)
}

/// Runs the organize operation with an optional explicit configuration file.
///
/// Returns `Err` only for fatal conditions: an unreadable configuration or a
/// missing target directory.
pub fn run_cli_with_config(
    dir_path: &Path,
    dry_run: bool,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let config = FilterConfig::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    if dry_run {
        OutputFormatter::dry_run_notice(&format!("Analyzing contents of: {}", dir_path.display()));
        let plan = Organizer::plan(dir_path, &filters).map_err(|e| e.to_string())?;
        report_plan(dir_path, &plan);
    } else {
        OutputFormatter::info(&format!("Organizing contents of: {}", dir_path.display()));
        let summary = Organizer::organize(dir_path, &filters).map_err(|e| e.to_string())?;
        report_summary(&summary);
    }

    Ok(())
}

/// Prints the planned moves and a per-bucket count table, without mutating
/// anything.
fn report_plan(dir_path: &Path, plan: &OrganizePlan) {
    if plan.moves.is_empty() {
        OutputFormatter::plain("No files would be moved.");
    } else {
        OutputFormatter::plain("Files would be organized as follows:");
    }

    let mut bucket_counts: HashMap<String, usize> = HashMap::new();
    for planned in &plan.moves {
        OutputFormatter::plain(&format!(
            " - {} → {}",
            planned.source.display(),
            planned.destination.display()
        ));

        // Bucket label: the destination directory relative to the root.
        let bucket = planned
            .destination
            .parent()
            .and_then(|parent| parent.strip_prefix(dir_path).ok())
            .map(|rel| rel.display().to_string())
            .unwrap_or_default();
        *bucket_counts.entry(bucket).or_insert(0) += 1;
    }

    if !plan.moves.is_empty() {
        OutputFormatter::bucket_table(&bucket_counts, plan.moves.len());
    }

    if plan.already_sorted > 0 {
        OutputFormatter::plain(&format!(
            "{} file(s) already at their final location.",
            plan.already_sorted
        ));
    }
    if plan.excluded > 0 {
        OutputFormatter::plain(&format!(
            "{} file(s) excluded by filter rules.",
            plan.excluded
        ));
    }
    for (path, reason) in &plan.skipped {
        OutputFormatter::warning(&format!("Cannot plan {}: {}", path.display(), reason));
    }

    OutputFormatter::success("Dry run complete. No files were modified.");
}

/// Prints the outcome of a completed run.
fn report_summary(summary: &OrganizeSummary) {
    OutputFormatter::plain(&format!(
        "Moved {} file(s) into date folders, {} into extension folders.",
        summary.date_bucketed, summary.extension_bucketed
    ));
    if summary.already_sorted > 0 {
        OutputFormatter::plain(&format!(
            "{} file(s) were already sorted and left in place.",
            summary.already_sorted
        ));
    }
    if summary.excluded > 0 {
        OutputFormatter::plain(&format!(
            "{} file(s) excluded by filter rules.",
            summary.excluded
        ));
    }
    if !summary.skipped.is_empty() {
        OutputFormatter::warning(&format!(
            "{} file(s) skipped due to errors; they will be retried on the next run.",
            summary.skipped.len()
        ));
    }

    OutputFormatter::success("Organization complete!");
}
