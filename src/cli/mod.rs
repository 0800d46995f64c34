//! Command-line interface for Trendboard.

mod commands;

use clap::{Parser, Subcommand};

/// Trendboard - trending search terms across Google and social platforms
#[derive(Parser)]
#[command(name = "trendboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Collect and store trends from every platform
    Refresh,

    /// Show stored trends ranked by volume
    #[command(alias = "rank")]
    Ranking {
        /// Only show this platform (Google, Facebook, Instagram, TikTok, YouTube)
        #[arg(long, short)]
        platform: Option<String>,
        /// Number of rows to show
        #[arg(long, short, default_value = "20")]
        limit: u64,
    },

    /// Search a term on every platform and store the results
    #[command(alias = "s")]
    Search {
        /// Term to search
        #[arg(required = true)]
        term: Vec<String>,
        /// Show results without storing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show recent user searches
    #[command(alias = "h")]
    History {
        /// Number of entries to show
        #[arg(default_value = "10")]
        limit: u64,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
