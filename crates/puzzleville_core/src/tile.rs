//! Tile types and the per-level supply of each.

use super::direction::{Connections, Direction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A kind of path piece the player can place.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum TileType {
    /// Two opposite openings.
    #[strum(to_string = "straight", serialize = "s")]
    Straight,
    /// Two adjacent openings.
    #[strum(to_string = "corner", serialize = "c")]
    Corner,
    /// Three openings.
    #[strum(to_string = "t-junction", serialize = "t", serialize = "tjunction")]
    TJunction,
}

impl TileType {
    /// Connection set before any rotation.
    pub fn canonical(self) -> Connections {
        use Direction::*;
        match self {
            TileType::Straight => Connections::from_directions(&[North, South]),
            TileType::Corner => Connections::from_directions(&[North, East]),
            TileType::TJunction => Connections::from_directions(&[North, West, East]),
        }
    }

    /// Palette caption.
    pub fn label(self) -> &'static str {
        match self {
            TileType::Straight => "Dirt Road",
            TileType::Corner => "Corner Path",
            TileType::TJunction => "T-Junction",
        }
    }

    /// Palette icon.
    pub fn icon(self) -> &'static str {
        match self {
            TileType::Straight => "—",
            TileType::Corner => "└",
            TileType::TJunction => "┴",
        }
    }
}

/// Remaining count of each tile type for the current attempt.
///
/// Types absent from the map have a count of zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileSupply {
    counts: BTreeMap<TileType, u32>,
}

impl TileSupply {
    /// Creates a supply from `(type, count)` pairs. Repeated types add up,
    /// saturating at `u32::MAX`.
    #[instrument(skip(entries))]
    pub fn new(entries: impl IntoIterator<Item = (TileType, u32)>) -> Self {
        let mut counts = BTreeMap::new();
        for (tile, count) in entries {
            let total = counts.entry(tile).or_insert(0u32);
            *total = total.saturating_add(count);
        }
        Self { counts }
    }

    /// Remaining count of `tile`.
    pub fn remaining(&self, tile: TileType) -> u32 {
        self.counts.get(&tile).copied().unwrap_or(0)
    }

    /// Whether at least one `tile` is left.
    pub fn is_available(&self, tile: TileType) -> bool {
        self.remaining(tile) > 0
    }

    /// Sum of all remaining counts, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.counts
            .values()
            .fold(0u32, |sum, count| sum.saturating_add(*count))
    }

    /// Iterates `(type, remaining)` for every type the level provisions.
    pub fn iter(&self) -> impl Iterator<Item = (TileType, u32)> + '_ {
        self.counts.iter().map(|(tile, count)| (*tile, *count))
    }

    /// Takes one `tile` from the supply.
    ///
    /// Returns false and leaves the supply untouched when none are left.
    #[instrument(skip(self))]
    pub fn take(&mut self, tile: TileType) -> bool {
        match self.counts.get_mut(&tile) {
            Some(count) if *count > 0 => {
                *count -= 1;
                debug!(remaining = *count, "Took tile from supply");
                true
            }
            _ => false,
        }
    }

    /// Puts one `tile` back, never exceeding `ceiling`.
    ///
    /// Returns whether the count changed.
    #[instrument(skip(self))]
    pub fn give_back(&mut self, tile: TileType, ceiling: u32) -> bool {
        let count = self.counts.entry(tile).or_insert(0);
        if *count < ceiling {
            *count += 1;
            debug!(remaining = *count, "Returned tile to supply");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_canonical_sets() {
        use Direction::*;
        let straight = TileType::Straight.canonical();
        assert!(straight.contains(North) && straight.contains(South));
        assert_eq!(straight.len(), 2);

        let corner = TileType::Corner.canonical();
        assert!(corner.contains(North) && corner.contains(East));

        let tee = TileType::TJunction.canonical();
        assert_eq!(tee.len(), 3);
        assert!(!tee.contains(South));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(TileType::from_str("straight").unwrap(), TileType::Straight);
        assert_eq!(TileType::from_str("C").unwrap(), TileType::Corner);
        assert_eq!(TileType::from_str("t-junction").unwrap(), TileType::TJunction);
        assert_eq!(TileType::from_str("t").unwrap(), TileType::TJunction);
        assert!(TileType::from_str("cross").is_err());
    }

    #[test]
    fn test_take_stops_at_zero() {
        let mut supply = TileSupply::new([(TileType::Corner, 1)]);
        assert!(supply.take(TileType::Corner));
        assert!(!supply.take(TileType::Corner));
        assert_eq!(supply.remaining(TileType::Corner), 0);
    }

    #[test]
    fn test_missing_type_is_exhausted() {
        let mut supply = TileSupply::new([(TileType::Straight, 2)]);
        assert!(!supply.is_available(TileType::TJunction));
        assert!(!supply.take(TileType::TJunction));
        assert_eq!(supply.total(), 2);
    }

    #[test]
    fn test_give_back_respects_ceiling() {
        let mut supply = TileSupply::new([(TileType::Straight, 1)]);
        assert!(!supply.give_back(TileType::Straight, 1));
        supply.take(TileType::Straight);
        assert!(supply.give_back(TileType::Straight, 1));
        assert_eq!(supply.remaining(TileType::Straight), 1);
    }

    #[test]
    fn test_repeated_entries_add_up() {
        let supply = TileSupply::new([(TileType::Corner, 2), (TileType::Corner, 3)]);
        assert_eq!(supply.remaining(TileType::Corner), 5);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let supply = TileSupply::new([
            (TileType::Corner, u32::MAX),
            (TileType::Corner, 1),
            (TileType::Straight, 7),
        ]);
        assert_eq!(supply.remaining(TileType::Corner), u32::MAX);
        assert_eq!(supply.total(), u32::MAX);
    }
}
