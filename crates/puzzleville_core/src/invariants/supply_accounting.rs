//! Supply accounting invariant: every tile spent is on the record.

use super::Invariant;
use crate::session::SessionState;
use crate::tile::TileType;
use strum::IntoEnumIterator;

/// Invariant: for each tile type, `initial - remaining == placed - refunded`.
///
/// Also implies the supply never grows past its starting count.
pub struct SupplyAccountingInvariant;

impl Invariant<SessionState> for SupplyAccountingInvariant {
    fn holds(session: &SessionState) -> bool {
        TileType::iter().all(|tile| {
            let initial = i64::from(session.initial_supply().remaining(tile));
            let remaining = i64::from(session.supply().remaining(tile));

            let placed = session
                .history()
                .iter()
                .filter(|placement| *placement.tile() == tile)
                .count() as i64;
            let refunded = session
                .history()
                .iter()
                .filter(|placement| *placement.replaced() == Some(tile) && *placement.refunded())
                .count() as i64;

            remaining <= initial && initial - remaining == placed - refunded
        })
    }

    fn description() -> &'static str {
        "Tiles spent from the supply match the placement history"
    }
}
