//! A* pathfinding types.

use std::cmp::Ordering;

use crate::config::defaults;
use crate::core::GridCoord;
use serde::{Deserialize, Serialize};

/// A node in the A* search
#[derive(Clone, Debug)]
pub(super) struct AStarNode {
    pub coord: GridCoord,
    pub g_cost: u32, // Cost from start
    pub f_cost: u32, // g_cost + heuristic
    pub seq: u64,    // Discovery order, breaks f ties
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior: lowest f, then earliest discovered
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AStarConfig {
    /// Maximum number of nodes to expand before giving up
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::max_iterations(),
        }
    }
}

/// Result of an A* search
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Path as grid coordinates, start and goal included (empty on failure)
    pub path_grid: Vec<GridCoord>,
    /// Total path cost in cells
    pub cost: u32,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    /// Create a failed result
    pub(super) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path_grid: Vec::new(),
            cost: u32::MAX,
            nodes_expanded,
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Path length in cells, start excluded
    pub fn length_cells(&self) -> usize {
        self.path_grid.len().saturating_sub(1)
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// Goal cell is a wall
    GoalBlocked,
    /// No path exists between start and goal
    NoPath,
    /// Maximum iterations exceeded
    MaxIterationsExceeded,
    /// Start or goal is out of bounds
    OutOfBounds,
}
