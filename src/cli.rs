//! Command-line argument definition and processing.

use clap::Parser;

use crate::app::RunOptions;

/// shelfscout - A fast, friendly TUI for searching the Open Library catalog
#[derive(Parser, Debug)]
#[command(name = "shelfscout")]
#[command(version)]
#[command(about = "A fast, friendly TUI for searching the Open Library catalog", long_about = None)]
pub struct Args {
    /// Search for a title right away
    #[arg(short, long)]
    pub search: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Specify the configuration directory (default: ~/.config/shelfscout)
    #[arg(long)]
    pub config_dir: Option<String>,

    /// Keep favorites and recent searches in memory only
    #[arg(long)]
    pub no_persist: bool,
}

impl Args {
    /// Runtime options carried by these arguments.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            search: self.search.clone(),
            no_persist: self.no_persist,
        }
    }
}

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level directive (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`; `RUST_LOG` still wins at filter construction.
#[must_use]
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}
