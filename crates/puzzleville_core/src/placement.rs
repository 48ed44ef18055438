//! Tile placement engine: every change to a cell's kind or openings.
//!
//! In-bounds actions that break a rule are ignored and report why.
//! Off-board coordinates fail with [`OutOfBoundsError`]. Either way a
//! rejected action changes nothing.

use super::action::{Action, ActionOutcome, PlaceOutcome, PlacementRejection, RotateOutcome, Selection};
use super::contracts::{Contract, LegalPlacement, PlacementContract, SupplyAvailable, TargetIsTile};
use super::error::OutOfBoundsError;
use super::grid::{Cell, Coord, PlacedTile};
use super::session::{Placement, SessionState};
use super::tile::TileType;
use tracing::{info, instrument, warn};

/// Marks `tile` as pending if any are left. Otherwise nothing changes.
#[instrument(skip(session), fields(level = session.level()))]
pub fn select_tile(session: &mut SessionState, tile: TileType) -> Selection {
    match SupplyAvailable::check(tile, session) {
        Ok(()) => {
            session.pending = Some(tile);
            info!(remaining = session.supply().remaining(tile), "Tile selected");
            Selection::Selected(tile)
        }
        Err(rejection) => {
            warn!(%rejection, "Selection ignored");
            Selection::Ignored(rejection)
        }
    }
}

/// Puts the pending tile, unrotated, on `coord`.
///
/// An existing tile there is overwritten. Whether its cost comes back
/// depends on [`EngineConfig::refund_replaced_tiles`](crate::EngineConfig).
#[instrument(skip(session), fields(level = session.level()))]
pub fn place_tile(
    session: &mut SessionState,
    coord: Coord,
) -> Result<PlaceOutcome, OutOfBoundsError> {
    let previous = *session.grid().cell_at(coord)?;

    let tile = match LegalPlacement::check(coord, session) {
        Ok(tile) => tile,
        Err(rejection) => {
            warn!(%rejection, "Placement ignored");
            return Ok(PlaceOutcome::Ignored(rejection));
        }
    };

    #[cfg(debug_assertions)]
    let before = session.clone();

    if !session.supply.take(tile) {
        return Ok(PlaceOutcome::Ignored(PlacementRejection::SupplyExhausted(tile)));
    }
    session.grid.set_cell(coord, Cell::Tile(PlacedTile::new(tile)))?;

    let replaced = previous.placed_tile().map(|old| old.tile);
    let refunded = match replaced {
        Some(old) if session.config().refund_replaced_tiles => {
            let ceiling = session.initial_supply().remaining(old);
            session.supply.give_back(old, ceiling)
        }
        _ => false,
    };

    let placement = Placement::new(coord, tile, replaced, refunded);
    session.history.push(placement);
    session.pending = None;

    info!(
        %tile,
        ?replaced,
        refunded,
        moves = session.moves(),
        "Tile placed"
    );

    #[cfg(debug_assertions)]
    {
        let post = PlacementContract::post(&before, session);
        debug_assert!(post.is_ok(), "Placement postcondition failed: {:?}", post);
    }

    Ok(PlaceOutcome::Placed(placement))
}

/// Turns the tile on `coord` a quarter clockwise. Anything else is ignored.
#[instrument(skip(session), fields(level = session.level()))]
pub fn rotate_tile(
    session: &mut SessionState,
    coord: Coord,
) -> Result<RotateOutcome, OutOfBoundsError> {
    session.grid().cell_at(coord)?;

    let placed = match TargetIsTile::check(coord, session) {
        Ok(placed) => placed,
        Err(rejection) => {
            warn!(%rejection, "Rotation ignored");
            return Ok(RotateOutcome::Ignored(rejection));
        }
    };

    #[cfg(debug_assertions)]
    let before = session.clone();

    let rotated = PlacedTile {
        tile: placed.tile,
        connections: placed.connections.rotated_clockwise(),
    };
    session.grid.set_cell(coord, Cell::Tile(rotated))?;
    info!(connections = %rotated.connections, "Tile rotated");

    #[cfg(debug_assertions)]
    {
        let post = super::contracts::RotationContract::post(&before, session);
        debug_assert!(post.is_ok(), "Rotation postcondition failed: {:?}", post);
    }

    Ok(RotateOutcome::Rotated {
        coord,
        connections: rotated.connections,
    })
}

/// Dispatches any [`Action`].
#[instrument(skip(session))]
pub fn apply(session: &mut SessionState, action: Action) -> Result<ActionOutcome, OutOfBoundsError> {
    Ok(match action {
        Action::Select(tile) => ActionOutcome::Select(select_tile(session, tile)),
        Action::Place(coord) => ActionOutcome::Place(place_tile(session, coord)?),
        Action::Rotate(coord) => ActionOutcome::Rotate(rotate_tile(session, coord)?),
    })
}

/// Whether placing the pending tile on `coord` would go through.
pub fn can_place(session: &SessionState, coord: Coord) -> bool {
    session.grid().contains(coord) && PlacementContract::pre(session, &coord).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::grid::CellKind;
    use crate::{EngineConfig, LevelCatalog};

    fn session(config: EngineConfig) -> SessionState {
        let catalog = LevelCatalog::builtin();
        SessionState::new(1, catalog.level(1).unwrap(), config).unwrap()
    }

    #[test]
    fn test_place_sets_canonical_connections() {
        let mut state = session(EngineConfig::default());
        select_tile(&mut state, TileType::Corner);
        let outcome = place_tile(&mut state, Coord::new(1, 0)).unwrap();

        assert!(matches!(outcome, PlaceOutcome::Placed(_)));
        let cell = state.grid().cell_at(Coord::new(1, 0)).unwrap();
        assert_eq!(cell.connections(), TileType::Corner.canonical());
        assert_eq!(state.moves(), 1);
        assert_eq!(state.supply().remaining(TileType::Corner), 4);
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_place_without_selection_is_ignored() {
        let mut state = session(EngineConfig::default());
        let before = state.clone();
        let outcome = place_tile(&mut state, Coord::new(1, 0)).unwrap();
        assert_eq!(outcome, PlaceOutcome::Ignored(PlacementRejection::NoSelection));
        assert_eq!(state, before);
    }

    #[test]
    fn test_place_on_obstacle_changes_nothing() {
        let mut state = session(EngineConfig::default());
        select_tile(&mut state, TileType::Straight);
        let before = state.clone();

        let outcome = place_tile(&mut state, Coord::new(2, 1)).unwrap();
        assert_eq!(
            outcome,
            PlaceOutcome::Ignored(PlacementRejection::CellNotPlaceable {
                coord: Coord::new(2, 1),
                kind: CellKind::Obstacle,
            })
        );
        assert_eq!(state, before);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.pending(), Some(TileType::Straight));
    }

    #[test]
    fn test_place_on_start_and_goal_rejected() {
        let mut state = session(EngineConfig::default());
        select_tile(&mut state, TileType::Straight);
        for coord in [Coord::new(0, 0), Coord::new(4, 4)] {
            let outcome = place_tile(&mut state, coord).unwrap();
            assert!(matches!(outcome, PlaceOutcome::Ignored(_)));
        }
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_out_of_bounds_fails_loudly() {
        let mut state = session(EngineConfig::default());
        select_tile(&mut state, TileType::Straight);
        let before = state.clone();
        let err = place_tile(&mut state, Coord::new(5, 0)).unwrap_err();
        assert_eq!(err.size, 5);
        assert!(rotate_tile(&mut state, Coord::new(0, 9)).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_overwrite_keeps_cost_by_default() {
        let mut state = session(EngineConfig::default());
        select_tile(&mut state, TileType::Straight);
        place_tile(&mut state, Coord::new(1, 1)).unwrap();
        select_tile(&mut state, TileType::Corner);
        let outcome = place_tile(&mut state, Coord::new(1, 1)).unwrap();

        match outcome {
            PlaceOutcome::Placed(placement) => {
                assert_eq!(*placement.replaced(), Some(TileType::Straight));
                assert!(!placement.refunded());
            }
            other => panic!("Expected placement, got {:?}", other),
        }
        assert_eq!(state.supply().remaining(TileType::Straight), 5);
        assert_eq!(state.supply().remaining(TileType::Corner), 4);
        assert_eq!(state.moves(), 2);
        assert_eq!(
            state.grid().cell_at(Coord::new(1, 1)).unwrap().connections(),
            TileType::Corner.canonical()
        );
    }

    #[test]
    fn test_overwrite_refunds_when_configured() {
        let mut state = session(EngineConfig::default().with_refund_replaced_tiles(true));
        select_tile(&mut state, TileType::Straight);
        place_tile(&mut state, Coord::new(1, 1)).unwrap();
        select_tile(&mut state, TileType::Corner);
        place_tile(&mut state, Coord::new(1, 1)).unwrap();

        assert_eq!(state.supply().remaining(TileType::Straight), 6);
        assert_eq!(state.moves(), 2);
    }

    #[test]
    fn test_overwrite_resets_rotation() {
        let mut state = session(EngineConfig::default());
        select_tile(&mut state, TileType::Corner);
        place_tile(&mut state, Coord::new(1, 1)).unwrap();
        rotate_tile(&mut state, Coord::new(1, 1)).unwrap();
        select_tile(&mut state, TileType::Corner);
        place_tile(&mut state, Coord::new(1, 1)).unwrap();
        assert_eq!(
            state.grid().cell_at(Coord::new(1, 1)).unwrap().connections(),
            TileType::Corner.canonical()
        );
    }

    #[test]
    fn test_exhausted_type_cannot_be_selected_or_placed() {
        let mut state = session(EngineConfig::default());
        for col in 0..5 {
            assert_eq!(
                select_tile(&mut state, TileType::Corner),
                Selection::Selected(TileType::Corner)
            );
            place_tile(&mut state, Coord::new(1, col)).unwrap();
        }
        assert_eq!(state.supply().remaining(TileType::Corner), 0);

        let before = state.clone();
        assert_eq!(
            select_tile(&mut state, TileType::Corner),
            Selection::Ignored(PlacementRejection::SupplyExhausted(TileType::Corner))
        );
        let outcome = place_tile(&mut state, Coord::new(3, 3)).unwrap();
        assert_eq!(outcome, PlaceOutcome::Ignored(PlacementRejection::NoSelection));
        assert_eq!(state, before);
    }

    #[test]
    fn test_exhausted_selection_keeps_previous_pick() {
        let mut state = session(EngineConfig::default());
        select_tile(&mut state, TileType::Straight);
        select_tile(&mut state, TileType::TJunction);
        assert_eq!(state.pending(), Some(TileType::Straight));
    }

    #[test]
    fn test_rotate_cycles_in_four_turns() {
        let mut state = session(EngineConfig::default());
        select_tile(&mut state, TileType::Corner);
        place_tile(&mut state, Coord::new(3, 3)).unwrap();
        let original = state.grid().cell_at(Coord::new(3, 3)).unwrap().connections();

        let outcome = rotate_tile(&mut state, Coord::new(3, 3)).unwrap();
        match outcome {
            RotateOutcome::Rotated { connections, .. } => {
                assert!(connections.contains(Direction::East));
                assert!(connections.contains(Direction::South));
            }
            other => panic!("Expected rotation, got {:?}", other),
        }
        for _ in 0..3 {
            rotate_tile(&mut state, Coord::new(3, 3)).unwrap();
        }
        assert_eq!(
            state.grid().cell_at(Coord::new(3, 3)).unwrap().connections(),
            original
        );
        assert_eq!(state.moves(), 1);
    }

    #[test]
    fn test_rotate_non_tile_is_ignored() {
        let mut state = session(EngineConfig::default());
        let before = state.clone();
        for coord in [Coord::new(0, 0), Coord::new(2, 1), Coord::new(3, 3)] {
            let outcome = rotate_tile(&mut state, coord).unwrap();
            assert!(matches!(outcome, RotateOutcome::Ignored(_)));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_dispatches() {
        let mut state = session(EngineConfig::default());
        let outcome = apply(&mut state, Action::Place(Coord::new(1, 1))).unwrap();
        assert_eq!(outcome.rejection(), Some(&PlacementRejection::NoSelection));

        apply(&mut state, Action::Select(TileType::Straight)).unwrap();
        assert!(can_place(&state, Coord::new(1, 1)));
        assert!(!can_place(&state, Coord::new(2, 1)));
        assert!(!can_place(&state, Coord::new(7, 7)));
        let outcome = apply(&mut state, Action::Place(Coord::new(1, 1))).unwrap();
        assert_eq!(outcome.rejection(), None);
    }
}
