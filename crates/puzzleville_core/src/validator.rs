//! Start-to-Goal reachability over placed tiles.
//!
//! An edge from a tile at A toward B exists when A opens toward B and
//! either B is the Goal or B is a tile opening back toward A. The Start
//! cell is the exception: it steps into every on-board, non-obstacle
//! neighbor regardless of what sits there. Nothing steps back into Start.
//!
//! All functions here are pure queries over a [`Grid`].

use super::direction::Direction;
use super::grid::{Cell, Coord, Grid};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::{debug, info, instrument};

/// Outcome of a path check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum PathStatus {
    /// Goal can be reached from Start.
    Reachable,
    /// No route exists.
    Unreachable,
}

impl PathStatus {
    /// True for [`PathStatus::Reachable`].
    pub fn is_reachable(self) -> bool {
        matches!(self, PathStatus::Reachable)
    }
}

/// Coordinates the search may step to from `coord`, in direction order.
#[instrument(skip(grid))]
pub fn connected_neighbors(grid: &Grid, coord: Coord) -> Vec<Coord> {
    let Ok(cell) = grid.cell_at(coord) else {
        return Vec::new();
    };

    match cell {
        Cell::Start => Direction::ALL
            .into_iter()
            .filter_map(|direction| grid.neighbor(coord, direction))
            .filter(|next| grid.is_traversable(*next))
            .collect(),
        Cell::Tile(placed) => placed
            .connections
            .iter()
            .filter_map(|direction| {
                grid.neighbor(coord, direction)
                    .map(|next| (direction, next))
            })
            .filter(|(_, next)| grid.is_traversable(*next))
            .filter(|(direction, next)| accepts_from(grid, *next, *direction))
            .map(|(_, next)| next)
            .collect(),
        Cell::Empty | Cell::Goal | Cell::Obstacle => Vec::new(),
    }
}

/// Whether the cell at `target` takes a path arriving while travelling `heading`.
fn accepts_from(grid: &Grid, target: Coord, heading: Direction) -> bool {
    match grid.cell_at(target) {
        Ok(Cell::Goal) => true,
        Ok(Cell::Tile(placed)) => placed.connections.contains(heading.inverse()),
        _ => false,
    }
}

/// Breadth-first walk from Start.
///
/// With `stop_at_goal` the walk ends as soon as Goal is dequeued.
struct Search {
    visited: BTreeSet<Coord>,
    parents: HashMap<Coord, Coord>,
    reached_goal: bool,
}

impl Search {
    fn run(grid: &Grid, stop_at_goal: bool) -> Self {
        let start = grid.start();
        let goal = grid.goal();

        let mut visited = BTreeSet::from([start]);
        let mut parents = HashMap::new();
        let mut queue = VecDeque::from([start]);
        let mut reached_goal = false;

        while let Some(current) = queue.pop_front() {
            if current == goal {
                reached_goal = true;
                if stop_at_goal {
                    break;
                }
                continue;
            }

            for next in connected_neighbors(grid, current) {
                if visited.insert(next) {
                    debug!(from = %current, to = %next, "Enqueued");
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        Self {
            visited,
            parents,
            reached_goal,
        }
    }
}

/// Decides whether a connected route runs from Start to Goal.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn validate_path(grid: &Grid) -> PathStatus {
    let status = if Search::run(grid, true).reached_goal {
        PathStatus::Reachable
    } else {
        PathStatus::Unreachable
    };
    info!(%status, "Path validated");
    status
}

/// The route the search found, Start first and Goal last.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn find_route(grid: &Grid) -> Option<Vec<Coord>> {
    let search = Search::run(grid, true);
    if !search.reached_goal {
        return None;
    }

    let mut route = vec![grid.goal()];
    let mut current = grid.goal();
    while let Some(parent) = search.parents.get(&current) {
        route.push(*parent);
        current = *parent;
    }
    route.reverse();
    debug!(steps = route.len(), "Route traced");
    Some(route)
}

/// Every coordinate the search can reach from Start, Start included.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn reachable_cells(grid: &Grid) -> BTreeSet<Coord> {
    Search::run(grid, false).visited
}
