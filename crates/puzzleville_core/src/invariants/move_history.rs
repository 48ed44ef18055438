//! Move history invariant: the board is what the history says.

use super::Invariant;
use crate::grid::Coord;
use crate::session::SessionState;
use crate::tile::TileType;
use std::collections::BTreeMap;

/// Invariant: the placed tiles are exactly the last placement at each
/// recorded coordinate.
///
/// Tiles are never removed, so every coordinate in the history must
/// still hold a tile of the type most recently placed there, and no
/// tile exists without a record.
pub struct MoveHistoryInvariant;

impl Invariant<SessionState> for MoveHistoryInvariant {
    fn holds(session: &SessionState) -> bool {
        let mut latest: BTreeMap<Coord, TileType> = BTreeMap::new();
        for placement in session.history() {
            latest.insert(*placement.coord(), *placement.tile());
        }

        let grid = session.grid();
        if grid.tile_count() != latest.len() {
            return false;
        }

        latest.iter().all(|(coord, tile)| {
            grid.cell_at(*coord)
                .ok()
                .and_then(|cell| cell.placed_tile())
                .is_some_and(|placed| placed.tile == *tile)
        })
    }

    fn description() -> &'static str {
        "Placed tiles match the latest placement at each coordinate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, PlacedTile};
    use crate::{EngineConfig, LevelCatalog, placement};

    fn session() -> SessionState {
        let catalog = LevelCatalog::builtin();
        SessionState::new(1, catalog.level(1).unwrap(), EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_holds_after_placements() {
        let mut state = session();
        placement::select_tile(&mut state, TileType::Corner);
        placement::place_tile(&mut state, Coord::new(0, 1)).unwrap();
        placement::select_tile(&mut state, TileType::Straight);
        placement::place_tile(&mut state, Coord::new(1, 0)).unwrap();
        assert!(MoveHistoryInvariant::holds(&state));
    }

    #[test]
    fn test_unrecorded_tile_violates() {
        let mut state = session();
        state
            .grid
            .set_cell(Coord::new(1, 1), Cell::Tile(PlacedTile::new(TileType::Corner)))
            .unwrap();
        assert!(!MoveHistoryInvariant::holds(&state));
    }
}
