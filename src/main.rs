use clap::Parser;
use datetidy::cli::run_cli_with_config;
use datetidy::output::OutputFormatter;
use std::path::PathBuf;

/// Sort a directory tree into YYYY-MM date folders with per-extension
/// subfolders.
#[derive(Parser)]
#[command(name = "datetidy", version, about)]
struct Args {
    /// Directory to organize
    #[arg(value_hint = clap::ValueHint::DirPath)]
    directory: PathBuf,

    /// Only print what would happen, without moving anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Path to a filter configuration file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run_cli_with_config(&args.directory, args.dry_run, args.config.as_deref()) {
        OutputFormatter::error(&e);
        std::process::exit(1);
    }
}
