//! PuzzleVille path engine.
//!
//! A player drops directional path tiles onto a square grid, turning
//! them until a route runs from the Start cell to the Goal cell, then
//! asks the engine to check it.
//!
//! # Architecture
//!
//! - **Grid**: cells, coordinates and structural checks
//! - **Placement**: selecting, placing and rotating tiles
//! - **Validator**: breadth-first reachability from Start to Goal
//! - **Attempt**: typestate phases of one try at a level
//! - **Contracts / Invariants**: pre- and postconditions checked in debug builds
//!
//! # Example
//!
//! ```
//! use puzzleville_core::{
//!     AttemptResult, Coord, EngineConfig, LevelCatalog, LevelDefinition, LevelInProgress,
//!     TileType,
//! };
//!
//! let catalog = LevelCatalog::new(vec![LevelDefinition::new(
//!     3,
//!     Coord::new(0, 0),
//!     Coord::new(0, 2),
//!     vec![],
//!     vec![(TileType::Straight, 1)],
//! )]);
//!
//! let mut attempt = LevelInProgress::load(&catalog, 1, EngineConfig::default())?;
//! attempt.select_tile(TileType::Straight);
//! attempt.place_tile(Coord::new(0, 1))?;
//! attempt.rotate_tile(Coord::new(0, 1))?;
//!
//! assert!(matches!(attempt.check_path(), AttemptResult::Completed(_)));
//! # Ok::<(), puzzleville_core::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod attempt;
mod catalog;
mod config;
mod direction;
mod error;
mod glyph;
mod grid;
mod session;
mod tile;

pub mod contracts;
pub mod invariants;
pub mod placement;
pub mod validator;

#[cfg(kani)]
mod kani_support;
#[cfg(kani)]
mod verification;

pub use action::{Action, ActionOutcome, PlaceOutcome, PlacementRejection, RotateOutcome, Selection};
pub use attempt::{Advance, AttemptResult, LevelCompleted, LevelFailed, LevelInProgress};
pub use catalog::{LevelCatalog, LevelDefinition};
pub use config::EngineConfig;
pub use direction::{Connections, Direction};
pub use error::{ConfigError, EngineError, LevelNotFoundError, OutOfBoundsError};
pub use glyph::PathGlyph;
pub use grid::{Cell, CellKind, CellView, Coord, Grid, MAX_GRID_SIZE, PlacedTile};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, SessionInvariants};
pub use session::{Placement, SessionState};
pub use tile::{TileSupply, TileType};
pub use validator::{PathStatus, find_route, reachable_cells, validate_path};
