use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface for c4reports.
/// Reads filters and source rows as JSON and prints columns and rows.
#[derive(Parser)]
#[command(
    name = "c4reports",
    version = env!("CARGO_PKG_VERSION"),
    about = "Monthly attendance grids and GL party statements from JSON input",
    long_about = None
)]
pub struct Cli {
    /// Pretty-print the JSON output
    #[arg(global = true, long = "pretty")]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Attendance grid from check-ins, approved leave and holidays
    Attendance {
        /// JSON file with `filters` and the attendance rows ("-" for stdin)
        #[arg(long = "input", short = 'i')]
        input: PathBuf,
    },

    /// Attendance grid from attendance records and holidays
    AttendanceRecords {
        /// JSON file with `filters` and the attendance rows ("-" for stdin)
        #[arg(long = "input", short = 'i')]
        input: PathBuf,
    },

    /// GL party statement with running balance
    GlParty {
        /// JSON file with `filters`, `entries` and party masters ("-" for stdin)
        #[arg(long = "input", short = 'i')]
        input: PathBuf,
    },
}
