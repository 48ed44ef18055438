//! Player actions and what became of them.
//!
//! Actions are plain values: they can be validated before they run,
//! logged, and replayed against a fresh attempt.

use super::direction::Connections;
use super::grid::{CellKind, Coord};
use super::session::Placement;
use super::tile::TileType;
use serde::{Deserialize, Serialize};

/// Something the player does to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Pick a tile type from the palette.
    Select(TileType),
    /// Put the picked tile on a cell.
    Place(Coord),
    /// Turn a placed tile a quarter clockwise.
    Rotate(Coord),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Select(tile) => write!(f, "select {}", tile),
            Action::Place(coord) => write!(f, "place {}", coord),
            Action::Rotate(coord) => write!(f, "rotate {}", coord),
        }
    }
}

/// Why an action left the attempt untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum PlacementRejection {
    /// No tile type is picked.
    #[display("No tile selected")]
    NoSelection,

    /// None of this tile type are left.
    #[display("No {} tiles left", _0)]
    SupplyExhausted(TileType),

    /// Start, Goal and Obstacle cells cannot take a tile.
    #[display("Cannot place a tile on the {} cell at {}", kind, coord)]
    CellNotPlaceable {
        /// Target cell.
        coord: Coord,
        /// What is there.
        kind: CellKind,
    },

    /// Only placed tiles can be rotated.
    #[display("Nothing to rotate: the cell at {} is {}", coord, kind)]
    NotATile {
        /// Target cell.
        coord: Coord,
        /// What is there.
        kind: CellKind,
    },

    /// The coordinate is not on the board.
    #[display("Cell {} is outside the {}x{} grid", coord, size, size)]
    OffBoard {
        /// Target cell.
        coord: Coord,
        /// Side length of the board.
        size: usize,
    },

    /// A postcondition failed after the action ran.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for PlacementRejection {}

/// Result of [`Action::Select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The type is now pending.
    Selected(TileType),
    /// Nothing changed.
    Ignored(PlacementRejection),
}

/// Result of [`Action::Place`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// A tile went down; the record says whether it overwrote another.
    Placed(Placement),
    /// Nothing changed.
    Ignored(PlacementRejection),
}

/// Result of [`Action::Rotate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotateOutcome {
    /// The tile now exposes `connections`.
    Rotated {
        /// Rotated cell.
        coord: Coord,
        /// Openings after the turn.
        connections: Connections,
    },
    /// Nothing changed.
    Ignored(PlacementRejection),
}

/// Result of any [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// From a select.
    Select(Selection),
    /// From a place.
    Place(PlaceOutcome),
    /// From a rotate.
    Rotate(RotateOutcome),
}

impl ActionOutcome {
    /// The rejection, when the action was ignored.
    pub fn rejection(&self) -> Option<&PlacementRejection> {
        match self {
            ActionOutcome::Select(Selection::Ignored(reason))
            | ActionOutcome::Place(PlaceOutcome::Ignored(reason))
            | ActionOutcome::Rotate(RotateOutcome::Ignored(reason)) => Some(reason),
            _ => None,
        }
    }
}
