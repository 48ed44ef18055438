//! First-class invariants over a level attempt.
//!
//! Each invariant is a logical property of [`SessionState`] that every
//! engine operation must preserve. They are checked after mutations in
//! debug builds and can be tested on their own.

use crate::session::SessionState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod fixed_cells;
pub mod move_history;
pub mod supply_accounting;

pub use fixed_cells::FixedCellsInvariant;
pub use move_history::MoveHistoryInvariant;
pub use supply_accounting::SupplyAccountingInvariant;

/// Every invariant of a level attempt as a composable set.
pub type SessionInvariants = (
    FixedCellsInvariant,
    SupplyAccountingInvariant,
    MoveHistoryInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, EngineConfig, LevelCatalog, TileType, placement};

    fn session() -> SessionState {
        let catalog = LevelCatalog::builtin();
        SessionState::new(1, catalog.level(1).unwrap(), EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_attempt() {
        assert!(SessionInvariants::check_all(&session()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_actions() {
        let mut state = session();
        placement::select_tile(&mut state, TileType::Corner);
        placement::place_tile(&mut state, Coord::new(1, 0)).unwrap();
        placement::rotate_tile(&mut state, Coord::new(1, 0)).unwrap();
        placement::select_tile(&mut state, TileType::Straight);
        placement::place_tile(&mut state, Coord::new(1, 0)).unwrap();

        assert!(SessionInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = session();
        state.supply.take(TileType::Straight);
        state.grid = crate::Grid::initialize(&crate::LevelDefinition::new(
            5,
            Coord::new(4, 4),
            Coord::new(0, 0),
            vec![],
            vec![],
        ))
        .unwrap();

        let violations = SessionInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (FixedCellsInvariant, SupplyAccountingInvariant);
        assert!(TwoInvariants::check_all(&session()).is_ok());
    }
}
