//! Phase-specific typestate structs for a level attempt.
//!
//! Each phase is its own type and only offers the transitions that are
//! legal from it. A failed attempt cannot advance; a finished attempt
//! cannot take more tiles.

use super::action::{Action, ActionOutcome, PlaceOutcome, RotateOutcome, Selection};
use super::catalog::LevelCatalog;
use super::config::EngineConfig;
use super::error::{EngineError, OutOfBoundsError};
use super::grid::{CellView, Coord};
use super::placement;
use super::session::SessionState;
use super::tile::TileType;
use super::validator::{self, PathStatus};
use tracing::{info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// A level being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelInProgress {
    session: SessionState,
}

impl LevelInProgress {
    /// Loads level `level` (1-based) from `catalog`.
    #[instrument(skip(catalog, config))]
    pub fn load(
        catalog: &LevelCatalog,
        level: usize,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let definition = catalog.level(level)?;
        let session = SessionState::new(level, definition, config)?;
        info!(level, size = session.grid().size(), "Level loaded");
        Ok(Self { session })
    }

    /// Loads a level and applies `actions` in order.
    #[instrument(skip(catalog, config, actions), fields(count = actions.len()))]
    pub fn replay(
        catalog: &LevelCatalog,
        level: usize,
        config: EngineConfig,
        actions: &[Action],
    ) -> Result<Self, EngineError> {
        let mut attempt = Self::load(catalog, level, config)?;
        for action in actions {
            attempt.apply(*action)?;
        }
        Ok(attempt)
    }

    /// The live attempt.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Level number, 1-based.
    pub fn level(&self) -> usize {
        self.session.level()
    }

    /// Successful placements so far.
    pub fn moves(&self) -> usize {
        self.session.moves()
    }

    /// Render data for one cell.
    pub fn cell_view(&self, coord: Coord) -> Result<CellView, OutOfBoundsError> {
        self.session.grid().view(coord)
    }

    /// See [`placement::select_tile`].
    pub fn select_tile(&mut self, tile: TileType) -> Selection {
        placement::select_tile(&mut self.session, tile)
    }

    /// See [`placement::place_tile`].
    pub fn place_tile(&mut self, coord: Coord) -> Result<PlaceOutcome, OutOfBoundsError> {
        placement::place_tile(&mut self.session, coord)
    }

    /// See [`placement::rotate_tile`].
    pub fn rotate_tile(&mut self, coord: Coord) -> Result<RotateOutcome, OutOfBoundsError> {
        placement::rotate_tile(&mut self.session, coord)
    }

    /// See [`placement::apply`].
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, OutOfBoundsError> {
        placement::apply(&mut self.session, action)
    }

    /// Checks the path without ending the attempt.
    pub fn validate_path(&self) -> PathStatus {
        self.session.validate_path()
    }

    /// Checks the path and ends the attempt with the verdict.
    #[instrument(skip(self), fields(level = self.level(), moves = self.moves()))]
    pub fn check_path(self) -> AttemptResult {
        match self.session.validate_path() {
            PathStatus::Reachable => {
                info!("Level completed");
                AttemptResult::Completed(LevelCompleted {
                    session: self.session,
                })
            }
            PathStatus::Unreachable => {
                warn!("Path check failed");
                AttemptResult::Failed(LevelFailed {
                    session: self.session,
                })
            }
        }
    }

    /// Throws the attempt away and starts the same level over.
    #[instrument(skip(self), fields(level = self.level()))]
    pub fn reset(self) -> Result<LevelInProgress, EngineError> {
        restart(&self.session)
    }
}

// ─────────────────────────────────────────────────────────────
//  Completed Phase
// ─────────────────────────────────────────────────────────────

/// A level whose path check succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCompleted {
    session: SessionState,
}

impl LevelCompleted {
    /// The attempt as it stood when checked.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Level number, 1-based.
    pub fn level(&self) -> usize {
        self.session.level()
    }

    /// Placements it took.
    pub fn moves(&self) -> usize {
        self.session.moves()
    }

    /// The winning route, Start first.
    pub fn route(&self) -> Vec<Coord> {
        validator::find_route(self.session.grid()).unwrap_or_default()
    }

    /// Plays the same level again.
    #[instrument(skip(self), fields(level = self.level()))]
    pub fn reset(self) -> Result<LevelInProgress, EngineError> {
        restart(&self.session)
    }

    /// Moves on to the next level, if there is one.
    #[instrument(skip(self, catalog), fields(level = self.level()))]
    pub fn advance(self, catalog: &LevelCatalog) -> Result<Advance, EngineError> {
        let next = self.level() + 1;
        match LevelInProgress::load(catalog, next, *self.session.config()) {
            Ok(attempt) => Ok(Advance::Next(attempt)),
            Err(EngineError::LevelNotFound(err)) if err.is_one_past_end() => {
                info!(last_level = self.level(), "All levels cleared");
                Ok(Advance::AllLevelsCleared {
                    last_level: self.level(),
                    moves: self.moves(),
                })
            }
            Err(err) => Err(err),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Failed Phase
// ─────────────────────────────────────────────────────────────

/// A level whose path check found no route. The only way on is a reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFailed {
    session: SessionState,
}

impl LevelFailed {
    /// The attempt as it stood when checked.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Level number, 1-based.
    pub fn level(&self) -> usize {
        self.session.level()
    }

    /// Placements made before the check.
    pub fn moves(&self) -> usize {
        self.session.moves()
    }

    /// Plays the same level again.
    #[instrument(skip(self), fields(level = self.level()))]
    pub fn reset(self) -> Result<LevelInProgress, EngineError> {
        restart(&self.session)
    }
}

fn restart(session: &SessionState) -> Result<LevelInProgress, EngineError> {
    let session = SessionState::new(session.level(), session.definition(), *session.config())?;
    info!(level = session.level(), "Level reset");
    Ok(LevelInProgress { session })
}

// ─────────────────────────────────────────────────────────────
//  Transition Results
// ─────────────────────────────────────────────────────────────

/// Verdict of [`LevelInProgress::check_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// Route found.
    Completed(LevelCompleted),
    /// No route.
    Failed(LevelFailed),
}

/// Where [`LevelCompleted::advance`] leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The next level, freshly loaded.
    Next(LevelInProgress),
    /// The completed level was the last one.
    AllLevelsCleared {
        /// Number of the final level.
        last_level: usize,
        /// Moves spent on it.
        moves: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_unknown_level() {
        let catalog = LevelCatalog::builtin();
        let err = LevelInProgress::load(&catalog, 7, EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::LevelNotFound(_)));
    }

    #[test]
    fn test_load_malformed_level() {
        let catalog = LevelCatalog::new(vec![crate::LevelDefinition::new(
            3,
            Coord::new(0, 0),
            Coord::new(3, 3),
            vec![],
            vec![],
        )]);
        let err = LevelInProgress::load(&catalog, 1, EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_reset_discards_progress() {
        let catalog = LevelCatalog::builtin();
        let mut attempt = LevelInProgress::load(&catalog, 1, EngineConfig::default()).unwrap();
        attempt.select_tile(TileType::Corner);
        attempt.place_tile(Coord::new(1, 0)).unwrap();
        assert_eq!(attempt.moves(), 1);

        let fresh = attempt.reset().unwrap();
        assert_eq!(fresh.moves(), 0);
        assert_eq!(fresh.level(), 1);
        assert_eq!(fresh.session().supply().remaining(TileType::Corner), 5);
    }

    #[test]
    fn test_failed_check_then_reset() {
        let catalog = LevelCatalog::builtin();
        let attempt = LevelInProgress::load(&catalog, 2, EngineConfig::default()).unwrap();
        match attempt.check_path() {
            AttemptResult::Failed(failed) => {
                assert_eq!(failed.level(), 2);
                let again = failed.reset().unwrap();
                assert_eq!(again.level(), 2);
            }
            AttemptResult::Completed(_) => panic!("Empty board cannot complete"),
        }
    }
}
