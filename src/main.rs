//! PuzzleVille - Unified CLI
//!
//! Plays the built-in level catalog in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use puzzleville::{Settings, Shell, ShellExit, level_summaries, render_levels};
use puzzleville_core::LevelCatalog;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            config,
            level,
            script,
        } => run_play(config, level, script),
        Command::Levels { json } => run_levels(json),
    }
}

/// Run the interactive shell
#[instrument]
fn run_play(config: Option<PathBuf>, level: Option<usize>, script: Option<PathBuf>) -> Result<()> {
    let settings = match config {
        Some(path) => Settings::from_file(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let level = level.unwrap_or(*settings.starting_level());

    info!(level, "Starting PuzzleVille");
    let shell = Shell::new(LevelCatalog::builtin(), settings);
    let mut stdout = std::io::stdout().lock();

    let exit = match script {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            shell.run(level, BufReader::new(file), &mut stdout)?
        }
        None => shell.run(level, std::io::stdin().lock(), &mut stdout)?,
    };

    match exit {
        ShellExit::AllCleared { last_level, moves } => {
            info!(last_level, moves, "All levels cleared");
        }
        ShellExit::Quit { level } | ShellExit::EndOfInput { level } => {
            writeln!(stdout, "Goodbye! You reached level {}.", level)?;
        }
    }
    Ok(())
}

/// List the level catalog
#[instrument]
fn run_levels(json: bool) -> Result<()> {
    let summaries = level_summaries(&LevelCatalog::builtin());
    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &summaries)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render_levels(&summaries))?;
    }
    Ok(())
}
