//! A* pathfinding on the store grid.
//!
//! - 4-connected movement with unit cost
//! - Manhattan heuristic
//! - Deterministic tie-breaking: lowest f first, then discovery order

mod planner;
mod types;

pub use planner::AStarPlanner;
pub use types::{AStarConfig, PathFailure, PathResult};

use std::collections::HashSet;

use crate::core::GridCoord;
use crate::grid::Grid;

/// Quick path finding with default configuration and nothing forbidden
pub fn find_path(grid: &Grid, start: GridCoord, goal: GridCoord) -> PathResult {
    AStarPlanner::with_defaults(grid).find_path(start, goal, &HashSet::new())
}

/// Check if a path exists
pub fn path_exists(grid: &Grid, start: GridCoord, goal: GridCoord) -> bool {
    find_path(grid, start, goal).success
}
