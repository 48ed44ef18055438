//! Static level definitions, indexed by level number.

use super::error::LevelNotFoundError;
use super::grid::Coord;
use super::tile::{TileSupply, TileType};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Immutable description of one level.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct LevelDefinition {
    /// Side length of the square grid.
    size: usize,
    /// Where the path begins.
    start: Coord,
    /// Where the path must arrive.
    goal: Coord,
    /// Blocked cells.
    obstacles: Vec<Coord>,
    /// Tiles handed to the player, by type.
    tiles: Vec<(TileType, u32)>,
}

impl LevelDefinition {
    /// Fresh supply seeded from this definition.
    pub fn supply(&self) -> TileSupply {
        TileSupply::new(self.tiles.iter().copied())
    }
}

/// Ordered set of levels, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Wraps a list of definitions. Level 1 is `levels[0]`.
    #[instrument(skip(levels), fields(count = levels.len()))]
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    /// The three levels the game ships with.
    ///
    /// Every level hands out more tiles than its shortest route needs.
    #[instrument]
    pub fn builtin() -> Self {
        use TileType::*;

        let c = Coord::new;
        Self::new(vec![
            LevelDefinition::new(
                5,
                c(0, 0),
                c(4, 4),
                vec![c(2, 1)],
                vec![(Straight, 6), (Corner, 5)],
            ),
            LevelDefinition::new(
                7,
                c(0, 0),
                c(6, 6),
                vec![c(2, 3), c(3, 2), c(4, 4)],
                vec![(Straight, 7), (Corner, 6)],
            ),
            LevelDefinition::new(
                8,
                c(0, 0),
                c(7, 7),
                vec![c(2, 2), c(3, 4), c(4, 3), c(5, 5)],
                vec![(Straight, 9), (Corner, 8), (TJunction, 2)],
            ),
        ])
    }

    /// Number of defined levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether no levels are defined.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Looks up a level by its 1-based number.
    #[instrument(skip(self))]
    pub fn level(&self, number: usize) -> Result<&LevelDefinition, LevelNotFoundError> {
        let found = number
            .checked_sub(1)
            .and_then(|index| self.levels.get(index));
        match found {
            Some(def) => {
                debug!(size = def.size, "Found level");
                Ok(def)
            }
            None => {
                warn!(available = self.levels.len(), "Level not in catalog");
                Err(LevelNotFoundError {
                    level: number,
                    available: self.levels.len(),
                })
            }
        }
    }

    /// Iterates `(number, definition)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LevelDefinition)> + '_ {
        self.levels.iter().enumerate().map(|(i, def)| (i + 1, def))
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
