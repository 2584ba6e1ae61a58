//! Console output and styling.
//!
//! Central place for all user-facing printing: colored status lines, the
//! progress bar used during the move loop, and the end-of-run summary table.
//! This is the notification surface of the tool; per-file warnings go through
//! here as well.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;

/// Styled console output helpers.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use datetidy::output::OutputFormatter;
    /// OutputFormatter::success("Organization complete!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red to stderr.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use datetidy::output::OutputFormatter;
    /// OutputFormatter::error("The folder '/tmp/missing' does not exist");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning in yellow to stderr.
    ///
    /// Per-file skips during a run are reported this way; they do not turn
    /// the overall run into a failure.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an informational message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints an unstyled message.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a bold section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice in yellow.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for a file-move loop.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of files to process
    ///
    /// # Example
    ///
    /// ```no_run
    /// use datetidy::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints a table of per-bucket file counts.
    ///
    /// # Arguments
    ///
    /// * `bucket_counts` - Bucket labels mapped to the number of files headed there
    /// * `total_files` - Total number of files across all buckets
    ///
    /// # Example
    ///
    /// ```no_run
    /// use datetidy::output::OutputFormatter;
    /// use std::collections::HashMap;
    ///
    /// let mut counts = HashMap::new();
    /// counts.insert("2024-03/jpg".to_string(), 8);
    /// counts.insert("2024-03/pdf".to_string(), 3);
    /// OutputFormatter::bucket_table(&counts, 11);
    /// ```
    pub fn bucket_table(bucket_counts: &HashMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        // Sort buckets for stable output.
        let mut buckets: Vec<_> = bucket_counts.iter().collect();
        buckets.sort_by_key(|&(name, _)| name);

        let width = buckets
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(6);

        println!("{:<width$} | {}", "Bucket".bold(), "Files".bold());
        println!("{}", "-".repeat(width + 10));

        for (bucket, count) in &buckets {
            let file_word = if **count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                bucket,
                count.to_string().green(),
                file_word,
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            if total_files == 1 { "file" } else { "files" },
        );
    }
}
