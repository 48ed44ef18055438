//! Box-drawing glyphs for placed tiles, keyed by connection subset.

use super::direction::{Connections, Direction};
use serde::{Deserialize, Serialize};

/// The symbol class a front end draws for a connection set.
///
/// Eleven classes cover every set with two or more directions.
/// Anything else falls back to [`PathGlyph::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathGlyph {
    /// North and South.
    Vertical,
    /// East and West.
    Horizontal,
    /// North and East.
    NorthEast,
    /// North and West.
    NorthWest,
    /// South and East.
    SouthEast,
    /// South and West.
    SouthWest,
    /// North, East and West.
    TeeNorth,
    /// South, East and West.
    TeeSouth,
    /// North, South and West.
    TeeWest,
    /// North, South and East.
    TeeEast,
    /// All four directions.
    Cross,
    /// Empty or single-direction sets.
    Unknown,
}

impl PathGlyph {
    /// Classifies a connection set by exact membership.
    pub fn for_connections(set: Connections) -> Self {
        use Direction::*;

        let n = set.contains(North);
        let e = set.contains(East);
        let s = set.contains(South);
        let w = set.contains(West);

        match (n, e, s, w) {
            (true, false, true, false) => PathGlyph::Vertical,
            (false, true, false, true) => PathGlyph::Horizontal,
            (true, true, false, false) => PathGlyph::NorthEast,
            (true, false, false, true) => PathGlyph::NorthWest,
            (false, true, true, false) => PathGlyph::SouthEast,
            (false, false, true, true) => PathGlyph::SouthWest,
            (true, true, false, true) => PathGlyph::TeeNorth,
            (false, true, true, true) => PathGlyph::TeeSouth,
            (true, false, true, true) => PathGlyph::TeeWest,
            (true, true, true, false) => PathGlyph::TeeEast,
            (true, true, true, true) => PathGlyph::Cross,
            _ => PathGlyph::Unknown,
        }
    }

    /// The character drawn for this class.
    pub fn symbol(self) -> &'static str {
        match self {
            PathGlyph::Vertical => "┃",
            PathGlyph::Horizontal => "━",
            PathGlyph::NorthEast => "┗",
            PathGlyph::NorthWest => "┛",
            PathGlyph::SouthEast => "┏",
            PathGlyph::SouthWest => "┓",
            PathGlyph::TeeNorth => "┻",
            PathGlyph::TeeSouth => "┳",
            PathGlyph::TeeWest => "┫",
            PathGlyph::TeeEast => "┣",
            PathGlyph::Cross => "╋",
            PathGlyph::Unknown => "❄",
        }
    }
}

impl std::fmt::Display for PathGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn set(directions: &[Direction]) -> Connections {
        Connections::from_directions(directions)
    }

    #[test]
    fn test_straight_glyphs() {
        use Direction::*;
        assert_eq!(PathGlyph::for_connections(set(&[North, South])).symbol(), "┃");
        assert_eq!(PathGlyph::for_connections(set(&[East, West])).symbol(), "━");
    }

    #[test]
    fn test_four_way_is_cross_not_tee() {
        assert_eq!(
            PathGlyph::for_connections(set(&Direction::ALL)),
            PathGlyph::Cross
        );
    }

    #[test]
    fn test_sparse_sets_are_unknown() {
        assert_eq!(PathGlyph::for_connections(Connections::NONE), PathGlyph::Unknown);
        for direction in Direction::ALL {
            assert_eq!(
                PathGlyph::for_connections(set(&[direction])),
                PathGlyph::Unknown
            );
        }
    }

    #[test]
    fn test_eleven_distinct_classes() {
        let mut seen = HashSet::new();
        for mask in 0u8..16 {
            let directions: Vec<Direction> = Direction::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, d)| d)
                .collect();
            let glyph = PathGlyph::for_connections(set(&directions));
            if glyph != PathGlyph::Unknown {
                seen.insert(glyph);
            }
        }
        assert_eq!(seen.len(), 11);
    }
}
