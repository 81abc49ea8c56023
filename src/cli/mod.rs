//! Command-line interface for lendr.

mod commands;

use clap::{Parser, Subcommand};

/// Lendr - loan decision service
/// Scores loan applications with three classifiers and records every verdict
#[derive(Parser)]
#[command(name = "lendr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    Serve,

    /// Print aggregate statistics over all recorded decisions
    Stats,

    /// Show the most recent decisions
    #[command(alias = "history")]
    Recent {
        /// Only show decisions attributed to this user
        #[arg(long)]
        user: Option<i64>,
        /// Number of entries to show
        #[arg(long, default_value = "10")]
        limit: u64,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
