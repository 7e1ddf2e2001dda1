//! CLI argument parsing module for monobump

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Change propagation and publish ordering for monorepo releases
#[derive(Parser, Debug, Clone)]
#[command(
    name = "monobump",
    version,
    about = "Change propagation and publish ordering for monorepo releases"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the workspace configuration file
    #[arg(long, global = true, default_value = crate::config::CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the change requests in publish order without touching any file
    Plan {
        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Apply the change requests to the project manifests
    Apply {
        /// Compute and report the edits without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Keep change files after applying them
        #[arg(long)]
        keep_changes: bool,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check that every modified project has a change declaration
    Verify {
        /// Persisted change record to check against
        #[arg(long)]
        record: PathBuf,

        /// Projects modified since the last release (comma separated or repeated)
        #[arg(long, value_delimiter = ',', num_args = 1.., required = true)]
        changed: Vec<String>,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },
}

impl CliArgs {
    /// Check if JSON output was requested
    pub fn json(&self) -> bool {
        match self.command {
            Command::Plan { json } => json,
            Command::Apply { json, .. } => json,
            Command::Verify { json, .. } => json,
        }
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "monobump=debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
