//! Compass directions and the fixed-size connection set a tile exposes.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the four orthogonal directions on the grid.
///
/// Rows grow downward, so `North` means "row - 1".
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
)]
pub enum Direction {
    /// Toward row 0.
    North,
    /// Toward the last column.
    East,
    /// Toward the last row.
    South,
    /// Toward column 0.
    West,
}

impl Direction {
    /// All four directions in clockwise order starting at North.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the opposite direction.
    pub fn inverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns the direction a quarter turn clockwise from this one.
    pub fn rotate_clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Row and column deltas for one step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::East => 0b0010,
            Direction::South => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

/// An unordered set of directions, stored as a 4-bit mask.
///
/// Empty for every cell that is not a placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Direction>", from = "Vec<Direction>")]
pub struct Connections(u8);

impl Connections {
    /// The empty set.
    pub const NONE: Connections = Connections(0);

    /// Builds a set from a slice of directions. Duplicates collapse.
    pub fn from_directions(directions: &[Direction]) -> Self {
        directions.iter().copied().collect()
    }

    /// Whether `direction` is in the set.
    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Adds `direction` to the set.
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Number of directions in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set has no directions.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the members in clockwise order starting at North.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }

    /// Maps every member a quarter turn clockwise.
    #[instrument]
    pub fn rotated_clockwise(self) -> Self {
        self.iter().map(Direction::rotate_clockwise).collect()
    }

    /// Applies [`Connections::rotated_clockwise`] `turns` times.
    pub fn rotated(self, turns: usize) -> Self {
        (0..turns % 4).fold(self, |set, _| set.rotated_clockwise())
    }
}

impl FromIterator<Direction> for Connections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Connections::NONE;
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

impl From<Vec<Direction>> for Connections {
    fn from(directions: Vec<Direction>) -> Self {
        directions.into_iter().collect()
    }
}

impl From<Connections> for Vec<Direction> {
    fn from(set: Connections) -> Self {
        set.iter().collect()
    }
}

impl std::fmt::Display for Connections {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
