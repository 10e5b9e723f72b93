//! Multi-waypoint route planning.

use std::collections::HashSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::{GridCoord, Product};
use crate::error::PlanError;
use crate::grid::Grid;

use super::astar::{AStarConfig, AStarPlanner, PathResult};
use super::route::Route;

/// Route planner settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum A* nodes to expand per segment search
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,

    /// Continue to the checkout after the last product
    #[serde(default = "defaults::enabled")]
    pub route_to_checkout: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::max_iterations(),
            route_to_checkout: defaults::enabled(),
        }
    }
}

impl PlannerConfig {
    /// A* settings for one segment search
    pub fn astar_config(&self) -> AStarConfig {
        AStarConfig {
            max_iterations: self.max_iterations,
        }
    }
}

/// Plans a route that visits waypoints in the given order.
///
/// Waypoints are never reordered. Each segment is an independent A* search
/// from the end of the previous segment.
pub struct RoutePlanner<'a> {
    grid: &'a Grid,
    config: PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    /// Create a planner over a grid
    pub fn new(grid: &'a Grid, config: PlannerConfig) -> Self {
        Self { grid, config }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a Grid) -> Self {
        Self::new(grid, PlannerConfig::default())
    }

    /// Plan from `start` through every waypoint in order.
    ///
    /// Cells in `forbidden` are avoided when possible: a segment that cannot
    /// be found around them is searched once more with them allowed. A
    /// waypoint that cannot be reached either way fails the whole call.
    pub fn plan(
        &self,
        start: GridCoord,
        waypoints: &[GridCoord],
        forbidden: &HashSet<GridCoord>,
    ) -> Result<Route, PlanError> {
        if !self.grid.in_bounds(start) {
            return Err(PlanError::StartOutOfBounds(start));
        }

        let astar = AStarPlanner::new(self.grid, self.config.astar_config());
        let mut route = Route::new(start);

        for (waypoint_index, &target) in waypoints.iter().enumerate() {
            let from = route.end();
            let result = self.search_segment(&astar, from, target, forbidden);
            if !result.success {
                debug!(
                    "[RoutePlanner] waypoint {} at {} unreachable from {}: {:?}",
                    waypoint_index, target, from, result.failure_reason
                );
                return Err(PlanError::Unreachable {
                    waypoint_index,
                    target,
                });
            }
            route.push_segment(&result.path_grid, target);
        }

        info!(
            "[RoutePlanner] route from {} through {} waypoints: {} steps, {}m",
            start,
            waypoints.len(),
            route.len(),
            route.total_distance()
        );
        Ok(route)
    }

    fn search_segment(
        &self,
        astar: &AStarPlanner<'_>,
        from: GridCoord,
        to: GridCoord,
        forbidden: &HashSet<GridCoord>,
    ) -> PathResult {
        let result = astar.find_path(from, to, forbidden);
        if result.success || forbidden.is_empty() {
            return result;
        }
        debug!(
            "[RoutePlanner] no path {} -> {} around {} forbidden cells, retrying without",
            from,
            to,
            forbidden.len()
        );
        astar.find_path(from, to, &HashSet::new())
    }

    /// Plan through the shelf locations of `products`, in order.
    ///
    /// Every product must already carry a grid placement. When
    /// `route_to_checkout` is set and the grid has a checkout, it is
    /// appended as the final waypoint.
    pub fn plan_products(
        &self,
        start: GridCoord,
        products: &[Product],
        forbidden: &HashSet<GridCoord>,
    ) -> Result<Route, PlanError> {
        let mut waypoints = products
            .iter()
            .map(|p| {
                p.location.ok_or_else(|| PlanError::InvalidLocation {
                    product_id: p.id.clone(),
                    name: p.name.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.config.route_to_checkout {
            if let Some(checkout) = self.grid.checkout() {
                waypoints.push(checkout);
            }
        }

        self.plan(start, &waypoints, forbidden)
    }
}
