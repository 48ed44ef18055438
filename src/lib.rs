//! PuzzleVille terminal front end.
//!
//! Wraps the `puzzleville_core` engine in a line-oriented shell.
//!
//! # Architecture
//!
//! - **Settings**: TOML preferences and engine rules
//! - **Command**: parsing of typed commands
//! - **Render**: text board, palette and level listings
//! - **Shell**: the read-eval loop driving level attempts
//!
//! # Example
//!
//! ```
//! use puzzleville::{Settings, Shell, ShellExit};
//! use puzzleville_core::LevelCatalog;
//!
//! let shell = Shell::new(LevelCatalog::builtin(), Settings::default());
//! let mut output = Vec::new();
//! let exit = shell.run(1, "select corner\nplace 0 1\nquit\n".as_bytes(), &mut output)?;
//! assert_eq!(exit, ShellExit::Quit { level: 1 });
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod command;
mod render;
mod settings;
mod shell;

// Crate-level exports - Settings
pub use settings::{Settings, SettingsError};

// Crate-level exports - Commands
pub use command::{CommandError, HELP, ShellCommand};

// Crate-level exports - Rendering
pub use render::{
    HINT, LevelSummary, level_summaries, render_board, render_levels, render_palette,
    render_route, share_text,
};

// Crate-level exports - Shell
pub use shell::{Shell, ShellExit, ShellState, Step};
