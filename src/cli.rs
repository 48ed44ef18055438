//! Command-line interface for puzzleville.

use clap::{Parser, Subcommand};

/// PuzzleVille - connect the path from S to G
#[derive(Parser, Debug)]
#[command(name = "puzzleville")]
#[command(about = "Path-tile puzzle game for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the levels interactively
    Play {
        /// Path to a settings file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Level to start on (overrides the settings file)
        #[arg(short, long)]
        level: Option<usize>,

        /// Read commands from a file instead of stdin
        #[arg(short, long)]
        script: Option<std::path::PathBuf>,
    },

    /// List the built-in levels
    Levels {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
