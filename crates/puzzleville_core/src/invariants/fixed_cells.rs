//! Fixed cells invariant: Start, Goal and Obstacles never move.

use super::Invariant;
use crate::grid::{Cell, CellKind};
use crate::session::SessionState;

/// Invariant: special cells sit exactly where the level puts them.
///
/// Exactly one Start at the defined start, exactly one Goal at the
/// defined goal, and an Obstacle at every defined obstacle and nowhere
/// else.
pub struct FixedCellsInvariant;

impl Invariant<SessionState> for FixedCellsInvariant {
    fn holds(session: &SessionState) -> bool {
        let definition = session.definition();
        let grid = session.grid();

        if grid.size() != *definition.size() {
            return false;
        }

        grid.iter().all(|(coord, cell)| {
            let expected = if coord == *definition.start() {
                CellKind::Start
            } else if coord == *definition.goal() {
                CellKind::Goal
            } else if definition.obstacles().contains(&coord) {
                CellKind::Obstacle
            } else {
                return matches!(cell, Cell::Empty | Cell::Tile(_));
            };
            cell.kind() == expected
        })
    }

    fn description() -> &'static str {
        "Start, Goal and Obstacle cells match the level definition"
    }
}
