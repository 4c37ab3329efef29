//! Command-line argument definition and processing.

use clap::Parser;

/// Casebook - browse a catalog of records by category, search them and keep favorites
#[derive(Parser, Debug, Default)]
#[command(name = "casebook")]
#[command(version)]
#[command(about = "Browse a catalog of records by category, search them and keep favorites", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Path to the records JSON file (default: dataset_path from settings.conf)
    #[arg(long)]
    pub data: Option<String>,

    /// Print records matching a search term and exit
    #[arg(short, long)]
    pub search: Option<String>,

    /// Restrict --search and --list-categories to favorite records
    #[arg(short, long)]
    pub favorites: bool,

    /// Print categories with their record counts and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Remove all saved favorites and exit
    #[arg(long)]
    pub clear_favorites: bool,

    /// Configuration directory (default: ~/.config/casebook)
    #[arg(long)]
    pub config_dir: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colors in the TUI
    #[arg(long)]
    pub no_color: bool,
}

/// What: Handle the flags that run a command and exit instead of starting the TUI.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `None` when the TUI should start; `Some(code)` with the process exit code otherwise.
///
/// Details:
/// - `--clear-favorites` runs first, so it can be combined with a listing.
/// - `--search` takes precedence over `--list-categories`.
pub fn process_args(args: &Args) -> Option<i32> {
    use crate::args::commands;

    if !args.clear_favorites && args.search.is_none() && !args.list_categories {
        if args.favorites {
            tracing::warn!("--favorites has no effect without --search or --list-categories");
        }
        return None;
    }
    let mut out = std::io::stdout().lock();
    let result = commands::run_commands(args, &mut out);
    match result {
        Ok(()) => Some(0),
        Err(e) => {
            eprintln!("casebook: {e}");
            tracing::error!(error = %e, "[Cli] Command failed");
            Some(1)
        }
    }
}
