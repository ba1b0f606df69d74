use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "episort")]
#[command(author, version, about = "Chat bot that re-delivers uploaded episodes in order")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the bot (Telegram long polling)
    Run,

    /// Sort file names offline and print the report
    Analyze {
        /// File names to analyze (read from stdin when none are given)
        names: Vec<String>,

        /// Read names from a file, one per line
        #[arg(short, long, conflicts_with = "names")]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the season and episode inferred from one file name
    Extract {
        /// File name to inspect
        #[arg(required = true)]
        name: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
