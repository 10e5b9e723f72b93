//! Route planning on the store grid.
//!
//! - **A\* search** ([`AStarPlanner`]): one segment between two cells
//! - **Route planning** ([`RoutePlanner`]): a start plus an ordered list of
//!   waypoints, with forbidden-cell avoidance and fallback
//!
//! ```rust,ignore
//! use marga_nav::pathfinding::RoutePlanner;
//!
//! let planner = RoutePlanner::with_defaults(&grid);
//! let route = planner.plan(entrance, &waypoints, &visited)?;
//! println!("{} steps, {}m", route.len(), route.total_distance());
//! ```

pub mod astar;
mod planner;
mod route;

pub use astar::{AStarConfig, AStarPlanner, PathFailure, PathResult, find_path, path_exists};
pub use planner::{PlannerConfig, RoutePlanner};
pub use route::{Direction, NavigationStep, Route, SECONDS_PER_STEP, STEP_DISTANCE_M};
