//! Kani arbitrary implementations for engine types.

use super::{Connections, Direction, TileType};

impl kani::Arbitrary for Direction {
    fn any() -> Self {
        let index: u8 = kani::any();
        kani::assume(index < 4);
        Direction::ALL[index as usize]
    }
}

impl kani::Arbitrary for TileType {
    fn any() -> Self {
        let index: u8 = kani::any();
        kani::assume(index < 3);
        match index {
            0 => TileType::Straight,
            1 => TileType::Corner,
            _ => TileType::TJunction,
        }
    }
}

impl kani::Arbitrary for Connections {
    fn any() -> Self {
        Direction::ALL
            .into_iter()
            .filter(|_| kani::any::<bool>())
            .collect()
    }
}
