//! Line-oriented shell that plays through the level catalog.
//!
//! The shell owns no board state of its own. Each command consumes the
//! current [`ShellState`] and hands back the next one, so the engine's
//! typestate decides what is allowed.

use crate::command::{HELP, ShellCommand};
use crate::render::{self, HINT};
use crate::settings::Settings;
use anyhow::Result;
use derive_getters::Getters;
use puzzleville_core::{
    ActionOutcome, Advance, AttemptResult, CellKind, EngineError, LevelCatalog, LevelCompleted,
    LevelFailed, LevelInProgress, PlaceOutcome, RotateOutcome, Selection, SessionState,
    reachable_cells,
};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Where a level attempt stands.
#[derive(Debug)]
pub enum ShellState {
    /// Tiles can be placed.
    Playing(LevelInProgress),
    /// Path check passed.
    Completed(LevelCompleted),
    /// Path check failed.
    Failed(LevelFailed),
}

impl ShellState {
    /// The attempt behind the state.
    pub fn session(&self) -> &SessionState {
        match self {
            ShellState::Playing(attempt) => attempt.session(),
            ShellState::Completed(done) => done.session(),
            ShellState::Failed(failed) => failed.session(),
        }
    }

    /// Level number, 1-based.
    pub fn level(&self) -> usize {
        self.session().level()
    }

    /// Placements made in this attempt.
    pub fn moves(&self) -> usize {
        self.session().moves()
    }
}

/// Why [`Shell::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// The player typed `quit`.
    Quit {
        /// Level being played.
        level: usize,
    },
    /// The last level was completed and `next` was given.
    AllCleared {
        /// Number of the final level.
        last_level: usize,
        /// Moves spent on it.
        moves: usize,
    },
    /// Input ran out.
    EndOfInput {
        /// Level being played.
        level: usize,
    },
}

/// Result of a single command.
#[derive(Debug)]
pub enum Step {
    /// Keep reading commands in this state.
    Continue(ShellState),
    /// Leave the shell.
    Exit(ShellExit),
}

/// Interactive front end over a level catalog.
#[derive(Debug, Clone, Getters)]
pub struct Shell {
    catalog: LevelCatalog,
    settings: Settings,
}

impl Shell {
    /// Creates a shell.
    #[instrument(skip(catalog, settings), fields(levels = catalog.len()))]
    pub fn new(catalog: LevelCatalog, settings: Settings) -> Self {
        info!("Creating shell");
        Self { catalog, settings }
    }

    /// Opens `level` for play.
    #[instrument(skip(self))]
    pub fn start(&self, level: usize) -> Result<ShellState, EngineError> {
        let attempt = LevelInProgress::load(&self.catalog, level, *self.settings.engine())?;
        Ok(ShellState::Playing(attempt))
    }

    /// Reads commands from `input` until `quit`, the end of the catalog,
    /// or the end of input.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    #[instrument(skip(self, input, output))]
    pub fn run<R: BufRead, W: Write>(
        &self,
        level: usize,
        input: R,
        output: &mut W,
    ) -> Result<ShellExit> {
        let mut state = self.start(level)?;
        writeln!(output, "Welcome to PuzzleVille! Type 'help' for commands.")?;
        show_level(&state, output)?;

        for line in input.lines() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let command = match text.parse::<ShellCommand>() {
                Ok(command) => command,
                Err(e) => {
                    warn!(input = %text, error = %e, "Unparsed command");
                    writeln!(output, "{}", e)?;
                    continue;
                }
            };

            state = match self.step(state, command, output)? {
                Step::Continue(next) => next,
                Step::Exit(exit) => {
                    info!(?exit, "Shell exiting");
                    return Ok(exit);
                }
            };
        }

        info!(level = state.level(), "Input exhausted");
        Ok(ShellExit::EndOfInput {
            level: state.level(),
        })
    }

    /// Applies one command to `state`.
    #[instrument(skip(self, state, output), fields(level = state.level()))]
    pub fn step<W: Write>(
        &self,
        state: ShellState,
        command: ShellCommand,
        output: &mut W,
    ) -> Result<Step> {
        debug!(?command, "Handling command");

        // Commands that behave the same in every state.
        match command {
            ShellCommand::Board => {
                write!(output, "{}", render::render_board(state.session().grid()))?;
                return Ok(Step::Continue(state));
            }
            ShellCommand::Help => {
                writeln!(output, "{}", HELP)?;
                return Ok(Step::Continue(state));
            }
            ShellCommand::Quit => {
                return Ok(Step::Exit(ShellExit::Quit {
                    level: state.level(),
                }));
            }
            _ => {}
        }

        match state {
            ShellState::Playing(attempt) => self.step_playing(attempt, command, output),
            ShellState::Completed(done) => self.step_completed(done, command, output),
            ShellState::Failed(failed) => step_failed(failed, command, output),
        }
    }

    fn step_playing<W: Write>(
        &self,
        mut attempt: LevelInProgress,
        command: ShellCommand,
        output: &mut W,
    ) -> Result<Step> {
        if let Some(action) = command.action() {
            match attempt.apply(action) {
                Ok(outcome) => report_outcome(&attempt, &outcome, output)?,
                Err(e) => {
                    warn!(error = %e, "Off-board command");
                    writeln!(output, "{}", e)?;
                }
            }
            return Ok(Step::Continue(ShellState::Playing(attempt)));
        }

        let next = match command {
            ShellCommand::Check => match attempt.check_path() {
                AttemptResult::Completed(done) => {
                    writeln!(
                        output,
                        "Level {} complete in {} moves!",
                        done.level(),
                        done.moves()
                    )?;
                    if *self.settings.show_route() {
                        writeln!(output, "Route: {}", render::render_route(&done.route()))?;
                    }
                    writeln!(output, "Type 'next' to continue or 'reset' to replay.")?;
                    ShellState::Completed(done)
                }
                AttemptResult::Failed(failed) => {
                    writeln!(output, "No path connects S to G. Type 'reset' to try again.")?;
                    ShellState::Failed(failed)
                }
            },
            ShellCommand::Reset => {
                let fresh = ShellState::Playing(attempt.reset()?);
                show_level(&fresh, output)?;
                fresh
            }
            ShellCommand::Supply => {
                write!(
                    output,
                    "{}",
                    render::render_palette(attempt.session().supply(), attempt.session().pending())
                )?;
                ShellState::Playing(attempt)
            }
            ShellCommand::Hint => {
                if *self.settings.show_hints() {
                    let reached = connected_tiles(attempt.session());
                    writeln!(output, "{}", HINT)?;
                    writeln!(output, "Cells connected to S: {}", reached)?;
                } else {
                    writeln!(output, "Hints are turned off.")?;
                }
                ShellState::Playing(attempt)
            }
            ShellCommand::Next => {
                writeln!(output, "Finish this level first: type 'check' when your path is ready.")?;
                ShellState::Playing(attempt)
            }
            ShellCommand::Share => {
                writeln!(output, "Nothing to share yet: check your path first.")?;
                ShellState::Playing(attempt)
            }
            _ => ShellState::Playing(attempt),
        };
        Ok(Step::Continue(next))
    }

    fn step_completed<W: Write>(
        &self,
        done: LevelCompleted,
        command: ShellCommand,
        output: &mut W,
    ) -> Result<Step> {
        let next = match command {
            ShellCommand::Next => match done.advance(&self.catalog)? {
                Advance::Next(attempt) => {
                    let state = ShellState::Playing(attempt);
                    show_level(&state, output)?;
                    state
                }
                Advance::AllLevelsCleared { last_level, moves } => {
                    writeln!(output, "Congratulations! You completed all levels!")?;
                    return Ok(Step::Exit(ShellExit::AllCleared { last_level, moves }));
                }
            },
            ShellCommand::Reset => {
                let fresh = ShellState::Playing(done.reset()?);
                show_level(&fresh, output)?;
                fresh
            }
            ShellCommand::Share => {
                writeln!(output, "{}", render::share_text(done.level(), done.moves(), true))?;
                ShellState::Completed(done)
            }
            _ => {
                writeln!(output, "Level complete: type 'next' or 'reset'.")?;
                ShellState::Completed(done)
            }
        };
        Ok(Step::Continue(next))
    }
}

/// Placed tiles (and Goal) the path from Start already reaches.
///
/// Empty cells next to Start are reachable but carry no path, so they
/// are not counted.
fn connected_tiles(session: &SessionState) -> usize {
    let grid = session.grid();
    reachable_cells(grid)
        .into_iter()
        .filter(|coord| {
            matches!(
                grid.cell_at(*coord).map(|cell| cell.kind()),
                Ok(CellKind::Tile | CellKind::Goal)
            )
        })
        .count()
}

fn step_failed<W: Write>(failed: LevelFailed, command: ShellCommand, output: &mut W) -> Result<Step> {
    let next = match command {
        ShellCommand::Reset => {
            let fresh = ShellState::Playing(failed.reset()?);
            show_level(&fresh, output)?;
            fresh
        }
        ShellCommand::Share => {
            writeln!(
                output,
                "{}",
                render::share_text(failed.level(), failed.moves(), false)
            )?;
            ShellState::Failed(failed)
        }
        _ => {
            writeln!(output, "The path check failed: type 'reset' to try again.")?;
            ShellState::Failed(failed)
        }
    };
    Ok(Step::Continue(next))
}

fn show_level<W: Write>(state: &ShellState, output: &mut W) -> Result<()> {
    let session = state.session();
    writeln!(output, "Level {}", state.level())?;
    write!(output, "{}", render::render_board(session.grid()))?;
    write!(
        output,
        "{}",
        render::render_palette(session.supply(), session.pending())
    )?;
    Ok(())
}

fn report_outcome<W: Write>(
    attempt: &LevelInProgress,
    outcome: &ActionOutcome,
    output: &mut W,
) -> Result<()> {
    if let Some(reason) = outcome.rejection() {
        writeln!(output, "{}", reason)?;
        return Ok(());
    }

    match outcome {
        ActionOutcome::Select(Selection::Selected(tile)) => {
            writeln!(
                output,
                "Selected {} ({} left)",
                tile.label(),
                attempt.session().supply().remaining(*tile)
            )?;
        }
        ActionOutcome::Place(PlaceOutcome::Placed(placement)) => {
            write!(output, "{}", render::render_board(attempt.session().grid()))?;
            match placement.replaced() {
                Some(old) => writeln!(
                    output,
                    "Placed {} at {} over a {} (moves: {})",
                    placement.tile().label(),
                    placement.coord(),
                    old.label(),
                    attempt.moves()
                )?,
                None => writeln!(
                    output,
                    "Placed {} at {} (moves: {})",
                    placement.tile().label(),
                    placement.coord(),
                    attempt.moves()
                )?,
            }
        }
        ActionOutcome::Rotate(RotateOutcome::Rotated { coord, .. }) => {
            write!(output, "{}", render::render_board(attempt.session().grid()))?;
            writeln!(output, "Rotated {}", coord)?;
        }
        _ => {}
    }
    Ok(())
}
