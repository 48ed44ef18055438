//! Parsing of typed shell commands.

use derive_more::{Display, Error};
use puzzleville_core::{Action, Coord, TileType};
use std::str::FromStr;
use tracing::instrument;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// `select <tile>`
    Select(TileType),
    /// `place <row> <col>`
    Place(Coord),
    /// `rotate <row> <col>`
    Rotate(Coord),
    /// `check`: run the path check and end the attempt.
    Check,
    /// `reset`: start the current level over.
    Reset,
    /// `next`: move on after a completed level.
    Next,
    /// `board`: redraw the grid.
    Board,
    /// `supply`: list remaining tiles.
    Supply,
    /// `hint`
    Hint,
    /// `share`: print a summary line of the attempt.
    Share,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

impl ShellCommand {
    /// The engine action this command maps to, for board-changing commands.
    pub fn action(self) -> Option<Action> {
        match self {
            ShellCommand::Select(tile) => Some(Action::Select(tile)),
            ShellCommand::Place(coord) => Some(Action::Place(coord)),
            ShellCommand::Rotate(coord) => Some(Action::Rotate(coord)),
            _ => None,
        }
    }
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  select <tile>        pick a tile: straight (s), corner (c), t-junction (t)
  place <row> <col>    put the picked tile on a cell
  rotate <row> <col>   turn a placed tile a quarter clockwise
  check                check the path from S to G
  reset                start the level over
  next                 go to the next level after a win
  board | supply       show the grid or the remaining tiles
  hint | share | help | quit";

impl FromStr for ShellCommand {
    type Err = CommandError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::new("Empty command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "select" | "sel" => {
                let [name] = args[..] else {
                    return Err(CommandError::new("Usage: select <tile>"));
                };
                let tile = TileType::from_str(name)
                    .map_err(|_| CommandError::new(format!("Unknown tile '{}'", name)))?;
                return Ok(ShellCommand::Select(tile));
            }
            "place" | "p" => return parse_coord("place", &args).map(ShellCommand::Place),
            "rotate" | "r" => return parse_coord("rotate", &args).map(ShellCommand::Rotate),
            "check" => ShellCommand::Check,
            "reset" => ShellCommand::Reset,
            "next" => ShellCommand::Next,
            "board" => ShellCommand::Board,
            "supply" => ShellCommand::Supply,
            "hint" => ShellCommand::Hint,
            "share" => ShellCommand::Share,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => {
                return Err(CommandError::new(format!(
                    "Unknown command '{}'. Type 'help' for a list",
                    other
                )));
            }
        };

        if !args.is_empty() {
            return Err(CommandError::new(format!("'{}' takes no arguments", verb)));
        }
        Ok(command)
    }
}

/// Accepts `r c` or `r,c`.
fn parse_coord(verb: &str, args: &[&str]) -> Result<Coord, CommandError> {
    let joined = args.join(" ");
    let parts: Vec<&str> = joined
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    let [row, col] = parts[..] else {
        return Err(CommandError::new(format!("Usage: {} <row> <col>", verb)));
    };
    let number = |text: &str| {
        text.parse::<usize>()
            .map_err(|_| CommandError::new(format!("'{}' is not a cell index", text)))
    };
    Ok(Coord::new(number(row)?, number(col)?))
}

/// Input that is not a valid command.
#[derive(Debug, Clone, Display, Error)]
#[display("{}", message)]
pub struct CommandError {
    /// What was wrong with the line.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CommandError {
    /// Creates a new command error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
