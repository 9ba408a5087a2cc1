//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Idle-time break reminder.
///
/// Samples how long you have been away from the keyboard once per second and
/// nags you when a short or long break is overdue.
#[derive(Debug, Parser)]
#[command(name = "rb", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the reminder loop. Press Ctrl-C to exit.
    Run,

    /// Print the current idle time in milliseconds.
    Idle,

    /// Show the recorded breaks.
    History {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
