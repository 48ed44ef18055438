//! Contract-based validation for tile placement and rotation.
//!
//! Contracts pair a precondition on the state and action with a
//! postcondition relating the state before and after: {P} action {Q}.

use super::action::PlacementRejection;
use super::grid::{Cell, Coord, PlacedTile};
use super::invariants::{InvariantSet, SessionInvariants};
use super::session::SessionState;
use super::tile::TileType;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), PlacementRejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), PlacementRejection>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: a tile type is pending.
pub struct SelectionPending;

impl SelectionPending {
    /// Returns the pending type.
    #[instrument(skip(session))]
    pub fn check(session: &SessionState) -> Result<TileType, PlacementRejection> {
        session.pending().ok_or(PlacementRejection::NoSelection)
    }
}

/// Precondition: at least one tile of the type is left.
pub struct SupplyAvailable;

impl SupplyAvailable {
    /// Fails with [`PlacementRejection::SupplyExhausted`] at zero.
    #[instrument(skip(session))]
    pub fn check(tile: TileType, session: &SessionState) -> Result<(), PlacementRejection> {
        if session.supply().is_available(tile) {
            Ok(())
        } else {
            Err(PlacementRejection::SupplyExhausted(tile))
        }
    }
}

/// Precondition: the target cell is Empty or already holds a tile.
pub struct CellAcceptsTile;

impl CellAcceptsTile {
    /// Off-board targets fail with [`PlacementRejection::OffBoard`].
    #[instrument(skip(session))]
    pub fn check(coord: Coord, session: &SessionState) -> Result<(), PlacementRejection> {
        match session.grid().cell_at(coord) {
            Ok(Cell::Empty | Cell::Tile(_)) => Ok(()),
            Ok(cell) => Err(PlacementRejection::CellNotPlaceable {
                coord,
                kind: cell.kind(),
            }),
            Err(e) => Err(PlacementRejection::OffBoard {
                coord,
                size: e.size,
            }),
        }
    }
}

/// Composite precondition for placing the pending tile at a coordinate.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all placement preconditions and returns the tile to place.
    #[instrument(skip(session))]
    pub fn check(coord: Coord, session: &SessionState) -> Result<TileType, PlacementRejection> {
        let tile = SelectionPending::check(session)?;
        SupplyAvailable::check(tile, session)?;
        CellAcceptsTile::check(coord, session)?;
        Ok(tile)
    }
}

/// Precondition: the target cell holds a tile.
pub struct TargetIsTile;

impl TargetIsTile {
    /// Returns the tile found there.
    #[instrument(skip(session))]
    pub fn check(coord: Coord, session: &SessionState) -> Result<PlacedTile, PlacementRejection> {
        match session.grid().cell_at(coord) {
            Ok(Cell::Tile(placed)) => Ok(*placed),
            Ok(cell) => Err(PlacementRejection::NotATile {
                coord,
                kind: cell.kind(),
            }),
            Err(e) => Err(PlacementRejection::OffBoard {
                coord,
                size: e.size,
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement and Rotation Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for placing the pending tile at a coordinate.
///
/// Preconditions:
/// - A tile type is pending
/// - That type has supply left
/// - The target is Empty or a Tile
///
/// Postconditions:
/// - Exactly one more move, selection cleared
/// - Every session invariant holds
pub struct PlacementContract;

impl Contract<SessionState, Coord> for PlacementContract {
    fn pre(session: &SessionState, coord: &Coord) -> Result<(), PlacementRejection> {
        LegalPlacement::check(*coord, session).map(|_| ())
    }

    fn post(before: &SessionState, after: &SessionState) -> Result<(), PlacementRejection> {
        if after.moves() != before.moves() + 1 {
            warn!(
                before = before.moves(),
                after = after.moves(),
                "Move counter did not advance by one"
            );
            return Err(PlacementRejection::InvariantViolation(
                "Move counter did not advance by one".to_string(),
            ));
        }
        if after.pending().is_some() {
            return Err(PlacementRejection::InvariantViolation(
                "Selection not cleared after placement".to_string(),
            ));
        }
        check_session_invariants(after)
    }
}

/// Contract for rotating a placed tile.
///
/// Preconditions:
/// - The target holds a tile
///
/// Postconditions:
/// - Moves and supply unchanged
/// - Every session invariant holds
pub struct RotationContract;

impl Contract<SessionState, Coord> for RotationContract {
    fn pre(session: &SessionState, coord: &Coord) -> Result<(), PlacementRejection> {
        TargetIsTile::check(*coord, session).map(|_| ())
    }

    fn post(before: &SessionState, after: &SessionState) -> Result<(), PlacementRejection> {
        if after.moves() != before.moves() || after.supply() != before.supply() {
            warn!("Rotation changed moves or supply");
            return Err(PlacementRejection::InvariantViolation(
                "Rotation changed moves or supply".to_string(),
            ));
        }
        check_session_invariants(after)
    }
}

#[instrument(skip(session))]
fn check_session_invariants(session: &SessionState) -> Result<(), PlacementRejection> {
    SessionInvariants::check_all(session).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
        PlacementRejection::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}
