//! Board topology: cells, coordinates and structural checks.

use super::catalog::LevelDefinition;
use super::direction::{Connections, Direction};
use super::error::{ConfigError, OutOfBoundsError};
use super::glyph::PathGlyph;
use super::tile::TileType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// A grid position, 0-indexed, rows growing downward.
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
    derive_new::new,
)]
pub struct Coord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A tile sitting on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    /// What was placed. Rotation never changes it.
    pub tile: TileType,
    /// Current openings after any rotations.
    pub connections: Connections,
}

impl PlacedTile {
    /// A freshly placed, unrotated tile.
    pub fn new(tile: TileType) -> Self {
        Self {
            tile,
            connections: tile.canonical(),
        }
    }
}

/// State of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing here yet.
    Empty,
    /// Where the path begins.
    Start,
    /// Where the path must arrive.
    Goal,
    /// Blocked.
    Obstacle,
    /// A player-placed tile.
    Tile(PlacedTile),
}

/// Discriminant of [`Cell`] without the tile payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum CellKind {
    /// Nothing here yet.
    Empty,
    /// Where the path begins.
    Start,
    /// Where the path must arrive.
    Goal,
    /// Blocked.
    Obstacle,
    /// A player-placed tile.
    Tile,
}

impl Cell {
    /// Kind of this cell.
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Start => CellKind::Start,
            Cell::Goal => CellKind::Goal,
            Cell::Obstacle => CellKind::Obstacle,
            Cell::Tile(_) => CellKind::Tile,
        }
    }

    /// Openings of a placed tile; empty for every other kind.
    pub fn connections(&self) -> Connections {
        match self {
            Cell::Tile(placed) => placed.connections,
            _ => Connections::NONE,
        }
    }

    /// The tile sitting here, if any.
    pub fn placed_tile(&self) -> Option<&PlacedTile> {
        match self {
            Cell::Tile(placed) => Some(placed),
            _ => None,
        }
    }
}

/// What a front end needs to draw one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Where the cell is.
    pub coord: Coord,
    /// Kind of the cell.
    pub kind: CellKind,
    /// Openings; empty unless `kind` is `Tile`.
    pub connections: Connections,
    /// Symbol class for tile cells.
    pub glyph: Option<PathGlyph>,
}

/// Largest side length a level may declare.
pub const MAX_GRID_SIZE: usize = 64;

/// Square board of cells for one level attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
    start: Coord,
    goal: Coord,
}

impl Grid {
    /// Builds the board described by `level`.
    ///
    /// Rejects a size of zero or above [`MAX_GRID_SIZE`], any special
    /// coordinate outside the board, and two special cells sharing a
    /// coordinate.
    #[instrument(skip(level), fields(size = level.size()))]
    pub fn initialize(level: &LevelDefinition) -> Result<Self, ConfigError> {
        let size = *level.size();
        if size == 0 {
            warn!("Level declares an empty grid");
            return Err(ConfigError::new("Grid size must be at least 1"));
        }
        if size > MAX_GRID_SIZE {
            warn!(max = MAX_GRID_SIZE, "Level declares an oversized grid");
            return Err(ConfigError::new(format!(
                "Grid size {} is too large (at most {})",
                size, MAX_GRID_SIZE
            )));
        }

        let mut grid = Self {
            size,
            cells: vec![Cell::Empty; size * size],
            start: *level.start(),
            goal: *level.goal(),
        };

        let specials = std::iter::once((*level.start(), Cell::Start))
            .chain(std::iter::once((*level.goal(), Cell::Goal)))
            .chain(level.obstacles().iter().map(|coord| (*coord, Cell::Obstacle)));

        let mut claimed = BTreeSet::new();
        for (coord, cell) in specials {
            let Some(index) = grid.index(coord) else {
                warn!(%coord, kind = %cell.kind(), "Special cell outside grid");
                return Err(ConfigError::new(format!(
                    "{} cell {} is outside the {}x{} grid",
                    cell.kind(),
                    coord,
                    size,
                    size
                )));
            };
            if !claimed.insert(coord) {
                warn!(%coord, kind = %cell.kind(), "Special cells overlap");
                return Err(ConfigError::new(format!(
                    "{} cell {} overlaps another special cell",
                    cell.kind(),
                    coord
                )));
            }
            grid.cells[index] = cell;
        }

        info!(
            start = %grid.start,
            goal = %grid.goal,
            obstacles = level.obstacles().len(),
            "Grid initialized"
        );
        Ok(grid)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Start coordinate.
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Goal coordinate.
    pub fn goal(&self) -> Coord {
        self.goal
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.row < self.size && coord.col < self.size).then(|| coord.row * self.size + coord.col)
    }

    /// Whether `coord` lies on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Returns the cell at `coord`.
    pub fn cell_at(&self, coord: Coord) -> Result<&Cell, OutOfBoundsError> {
        self.index(coord)
            .map(|index| &self.cells[index])
            .ok_or(OutOfBoundsError {
                row: coord.row,
                col: coord.col,
                size: self.size,
            })
    }

    /// Replaces the cell at `coord`. Kind rules are the caller's business.
    pub(crate) fn set_cell(&mut self, coord: Coord, cell: Cell) -> Result<(), OutOfBoundsError> {
        let size = self.size;
        let index = self.index(coord).ok_or(OutOfBoundsError {
            row: coord.row,
            col: coord.col,
            size,
        })?;
        self.cells[index] = cell;
        Ok(())
    }

    /// False for obstacles and off-board coordinates, true otherwise.
    ///
    /// This only says a location may be stood on. Whether a path can
    /// enter it through a tile is decided by the validator.
    pub fn is_traversable(&self, coord: Coord) -> bool {
        match self.cell_at(coord) {
            Ok(cell) => cell.kind() != CellKind::Obstacle,
            Err(_) => false,
        }
    }

    /// The on-board coordinate one step from `coord` toward `direction`.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.offset();
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        let next = Coord::new(row, col);
        self.contains(next).then_some(next)
    }

    /// Iterates every coordinate with its cell, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (Coord::new(index / self.size, index % self.size), cell))
    }

    /// Coordinates of every obstacle, row by row.
    pub fn obstacles(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.kind() == CellKind::Obstacle)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Number of placed tiles.
    pub fn tile_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Tile(_)))
            .count()
    }

    /// Render data for `coord`.
    #[instrument(skip(self))]
    pub fn view(&self, coord: Coord) -> Result<CellView, OutOfBoundsError> {
        let cell = self.cell_at(coord)?;
        debug!(kind = %cell.kind(), "Rendering cell");
        Ok(Self::view_of(coord, cell))
    }

    /// Render data for the whole board, row by row.
    pub fn views(&self) -> Vec<Vec<CellView>> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| {
                        let coord = Coord::new(row, col);
                        Self::view_of(coord, &self.cells[row * self.size + col])
                    })
                    .collect()
            })
            .collect()
    }

    fn view_of(coord: Coord, cell: &Cell) -> CellView {
        CellView {
            coord,
            kind: cell.kind(),
            connections: cell.connections(),
            glyph: cell
                .placed_tile()
                .map(|placed| PathGlyph::for_connections(placed.connections)),
        }
    }
}
