//! Formal verification of direction and rotation rules using Kani.
//!
//! These harnesses cover every direction, tile type and connection set.

use super::{Connections, Direction, TileType};

/// Proves: the inverse of the inverse is the original direction.
#[kani::proof]
fn verify_inverse_involution() {
    let direction: Direction = kani::any();
    assert_eq!(direction.inverse().inverse(), direction);
    assert_ne!(direction.inverse(), direction);
}

/// Proves: four quarter turns restore any connection set.
#[kani::proof]
#[kani::unwind(5)]
fn verify_rotation_cycle() {
    let set: Connections = kani::any();
    let turned = set
        .rotated_clockwise()
        .rotated_clockwise()
        .rotated_clockwise()
        .rotated_clockwise();
    assert_eq!(turned, set);
}

/// Proves: rotation never adds or drops an opening.
#[kani::proof]
#[kani::unwind(5)]
fn verify_rotation_preserves_size() {
    let tile: TileType = kani::any();
    let canonical = tile.canonical();
    assert_eq!(canonical.rotated_clockwise().len(), canonical.len());
}
