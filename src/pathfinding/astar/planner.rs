//! A* planner implementation.

use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, trace};

use crate::core::{CellKind, GridCoord};
use crate::grid::Grid;

use super::types::{AStarConfig, AStarNode, PathFailure, PathResult};

/// A* pathfinder over the store grid.
///
/// 4-connected, unit step cost, Manhattan heuristic. A cell is passable if
/// its kind is walkable, or if it is the goal and not a wall. Cells in the
/// `forbidden` set are impassable unless they are the goal.
pub struct AStarPlanner<'a> {
    grid: &'a Grid,
    config: AStarConfig,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new A* planner
    pub fn new(grid: &'a Grid, config: AStarConfig) -> Self {
        Self { grid, config }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a Grid) -> Self {
        Self::new(grid, AStarConfig::default())
    }

    /// Find a path from start to goal.
    ///
    /// The start cell itself is never tested for passability: segments of
    /// a multi-stop route begin on the shelf cell that was the previous
    /// goal.
    pub fn find_path(
        &self,
        start: GridCoord,
        goal: GridCoord,
        forbidden: &HashSet<GridCoord>,
    ) -> PathResult {
        trace!(
            "[AStar] find_path: start=({},{}) goal=({},{}) forbidden={}",
            start.x,
            start.y,
            goal.x,
            goal.y,
            forbidden.len()
        );

        if !self.grid.in_bounds(start) || !self.grid.in_bounds(goal) {
            debug!("[AStar] FAILED: OutOfBounds - start or goal outside grid");
            return PathResult::failed(PathFailure::OutOfBounds, 0);
        }

        if self.grid.kind(goal) == Some(CellKind::Wall) {
            debug!("[AStar] FAILED: GoalBlocked at ({},{})", goal.x, goal.y);
            return PathResult::failed(PathFailure::GoalBlocked, 0);
        }

        let mut open_set = BinaryHeap::new();
        let mut closed_set = HashSet::new();
        let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
        let mut g_scores: HashMap<GridCoord, u32> = HashMap::new();
        let mut seq: u64 = 0;

        open_set.push(AStarNode {
            coord: start,
            g_cost: 0,
            f_cost: heuristic(start, goal),
            seq,
        });
        g_scores.insert(start, 0);

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            if closed_set.contains(&current.coord) {
                continue;
            }

            nodes_expanded += 1;
            if nodes_expanded > self.config.max_iterations {
                debug!(
                    "[AStar] FAILED: MaxIterationsExceeded ({} nodes)",
                    nodes_expanded
                );
                return PathResult::failed(PathFailure::MaxIterationsExceeded, nodes_expanded);
            }

            if current.coord == goal {
                return reconstruct_path(&came_from, goal, current.g_cost, nodes_expanded);
            }

            closed_set.insert(current.coord);

            for neighbor in current.coord.neighbors_4() {
                if closed_set.contains(&neighbor) || !self.is_passable(neighbor, goal, forbidden) {
                    continue;
                }

                let tentative_g = current.g_cost + 1;
                let known_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);
                if tentative_g < known_g {
                    came_from.insert(neighbor, current.coord);
                    g_scores.insert(neighbor, tentative_g);

                    seq += 1;
                    open_set.push(AStarNode {
                        coord: neighbor,
                        g_cost: tentative_g,
                        f_cost: tentative_g + heuristic(neighbor, goal),
                        seq,
                    });
                }
            }
        }

        debug!(
            "[AStar] FAILED: NoPath after expanding {} nodes",
            nodes_expanded
        );
        PathResult::failed(PathFailure::NoPath, nodes_expanded)
    }

    fn is_passable(&self, coord: GridCoord, goal: GridCoord, forbidden: &HashSet<GridCoord>) -> bool {
        let Some(kind) = self.grid.kind(coord) else {
            return false;
        };
        if coord == goal {
            return kind != CellKind::Wall;
        }
        kind.is_walkable() && !forbidden.contains(&coord)
    }
}

/// Manhattan distance
#[inline]
fn heuristic(from: GridCoord, to: GridCoord) -> u32 {
    from.manhattan_distance(&to).unsigned_abs()
}

fn reconstruct_path(
    came_from: &HashMap<GridCoord, GridCoord>,
    goal: GridCoord,
    cost: u32,
    nodes_expanded: usize,
) -> PathResult {
    let mut path_grid = Vec::new();
    let mut current = goal;

    while let Some(&prev) = came_from.get(&current) {
        path_grid.push(current);
        current = prev;
    }
    path_grid.push(current); // Add start
    path_grid.reverse();

    trace!(
        "[AStar] SUCCESS: path length={} cells, cost={}, nodes_expanded={}",
        path_grid.len(),
        cost,
        nodes_expanded
    );

    PathResult {
        path_grid,
        cost,
        nodes_expanded,
        success: true,
        failure_reason: None,
    }
}
