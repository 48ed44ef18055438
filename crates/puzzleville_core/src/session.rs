//! Per-attempt mutable state.

use super::catalog::LevelDefinition;
use super::config::EngineConfig;
use super::error::ConfigError;
use super::grid::{Coord, Grid};
use super::tile::{TileSupply, TileType};
use super::validator::{self, PathStatus};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// One successful placement, kept in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct Placement {
    /// Where the tile went.
    coord: Coord,
    /// What was placed.
    tile: TileType,
    /// The tile it overwrote, if the cell already held one.
    replaced: Option<TileType>,
    /// Whether the overwritten tile went back into the supply.
    refunded: bool,
}

/// Everything that changes during one attempt at a level.
///
/// Built fresh on load or reset and never merged into a previous attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) level: usize,
    pub(crate) definition: LevelDefinition,
    pub(crate) grid: Grid,
    pub(crate) supply: TileSupply,
    pub(crate) initial_supply: TileSupply,
    pub(crate) pending: Option<TileType>,
    pub(crate) history: Vec<Placement>,
    pub(crate) config: EngineConfig,
}

impl SessionState {
    /// Starts an attempt at `definition`, numbered `level`.
    #[instrument(skip(definition, config))]
    pub fn new(
        level: usize,
        definition: &LevelDefinition,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        let grid = Grid::initialize(definition)?;
        let supply = definition.supply();
        info!(level, tiles = supply.total(), "Session created");
        Ok(Self {
            level,
            definition: definition.clone(),
            grid,
            initial_supply: supply.clone(),
            supply,
            pending: None,
            history: Vec::new(),
            config,
        })
    }

    /// Level number, 1-based.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Successful placements so far. Rotations do not count.
    pub fn moves(&self) -> usize {
        self.history.len()
    }

    /// The live board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tiles left.
    pub fn supply(&self) -> &TileSupply {
        &self.supply
    }

    /// Tiles the level started with.
    pub fn initial_supply(&self) -> &TileSupply {
        &self.initial_supply
    }

    /// The tile type waiting to be placed, if any.
    pub fn pending(&self) -> Option<TileType> {
        self.pending
    }

    /// Placements in the order they happened.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Rules in force for this attempt.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The definition this attempt was built from.
    pub fn definition(&self) -> &LevelDefinition {
        &self.definition
    }

    /// Whether Start currently connects to Goal. Read-only.
    pub fn validate_path(&self) -> PathStatus {
        validator::validate_path(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LevelCatalog;

    #[test]
    fn test_new_session_is_fresh() {
        let catalog = LevelCatalog::builtin();
        let session = SessionState::new(2, catalog.level(2).unwrap(), EngineConfig::default())
            .unwrap();

        assert_eq!(session.level(), 2);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.pending(), None);
        assert!(session.history().is_empty());
        assert_eq!(session.grid().size(), 7);
        assert_eq!(session.supply(), session.initial_supply());
    }

    #[test]
    fn test_new_session_rejects_bad_definition() {
        let def = LevelDefinition::new(
            3,
            Coord::new(0, 0),
            Coord::new(0, 0),
            vec![],
            vec![(TileType::Straight, 1)],
        );
        assert!(SessionState::new(1, &def, EngineConfig::default()).is_err());
    }
}
