//! Navigation route: the ordered, 4-adjacent list of steps a shopper walks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{GridCoord, PathDirection};

/// Walking distance covered by one grid cell, in meters
pub const STEP_DISTANCE_M: u32 = 2;

/// Seconds a shopper needs per step, used for ETA
pub const SECONDS_PER_STEP: u32 = 30;

/// Single-axis move taken to arrive at a step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// y - 1
    Up,
    /// y + 1
    Down,
    /// x - 1
    Left,
    /// x + 1
    Right,
}

impl Direction {
    /// Direction of the move from `prev` to `next`.
    ///
    /// x takes precedence over y; returns `None` when the cells coincide.
    pub fn between(prev: GridCoord, next: GridCoord) -> Option<Self> {
        if next.x > prev.x {
            Some(Direction::Right)
        } else if next.x < prev.x {
            Some(Direction::Left)
        } else if next.y > prev.y {
            Some(Direction::Down)
        } else if next.y < prev.y {
            Some(Direction::Up)
        } else {
            None
        }
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Is this a left/right move?
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Turn-by-turn instruction for one step of this direction
    pub fn instruction(self, distance: u32) -> String {
        match self {
            Direction::Right => format!("Continue right {}m", distance),
            Direction::Left => format!("Continue left {}m", distance),
            Direction::Down | Direction::Up => format!("Go straight {}m", distance),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One cell of a route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStep {
    /// Cell reached by this step
    pub coord: GridCoord,
    /// Move taken to arrive here
    pub direction: Direction,
    /// Human-readable instruction
    pub instruction: String,
    /// Distance covered by this step, in meters
    pub distance: u32,
}

impl NavigationStep {
    /// Create the step that moves from `prev` into `coord`
    pub fn new(coord: GridCoord, direction: Direction) -> Self {
        Self {
            coord,
            direction,
            instruction: direction.instruction(STEP_DISTANCE_M),
            distance: STEP_DISTANCE_M,
        }
    }
}

/// An ordered route from an origin through a list of waypoints.
///
/// The origin itself is not a step: `steps[0]` is the first cell entered.
/// Routes are built once by the planner and then shared read-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    origin: GridCoord,
    steps: Vec<NavigationStep>,
    waypoints: Vec<GridCoord>,
    /// Step index at which each waypoint is reached (`None` = at the origin)
    waypoint_steps: Vec<Option<usize>>,
}

impl Route {
    /// Empty route anchored at `origin`
    pub fn new(origin: GridCoord) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    /// Append a segment path whose first cell is the route's current end.
    ///
    /// The shared boundary cell is emitted once. `waypoint` is the segment
    /// goal and is recorded against the last step.
    pub(crate) fn push_segment(&mut self, path: &[GridCoord], waypoint: GridCoord) {
        let mut prev = self.end();
        for &coord in path.iter().skip(1) {
            if let Some(direction) = Direction::between(prev, coord) {
                self.steps.push(NavigationStep::new(coord, direction));
                prev = coord;
            }
        }
        self.waypoints.push(waypoint);
        self.waypoint_steps.push(self.steps.len().checked_sub(1));
    }

    /// Keep steps `0..=cursor` and continue with `tail`, which must start
    /// at the cursor step. Waypoints already passed are kept.
    pub fn spliced(&self, cursor: usize, tail: &Route) -> Route {
        let keep = (cursor + 1).min(self.steps.len());
        let mut route = Route {
            origin: self.origin,
            steps: self.steps[..keep].to_vec(),
            waypoints: Vec::new(),
            waypoint_steps: Vec::new(),
        };

        for (&waypoint, &step) in self.waypoints.iter().zip(&self.waypoint_steps) {
            if step.is_none_or(|i| i < keep) {
                route.waypoints.push(waypoint);
                route.waypoint_steps.push(step);
            }
        }

        let anchor = keep.checked_sub(1);
        for (&waypoint, &step) in tail.waypoints.iter().zip(&tail.waypoint_steps) {
            route.waypoints.push(waypoint);
            route.waypoint_steps.push(step.map(|i| i + keep).or(anchor));
        }
        route.steps.extend(tail.steps.iter().cloned());
        route
    }

    /// Where the route starts (not itself a step)
    pub fn origin(&self) -> GridCoord {
        self.origin
    }

    /// Last cell of the route, or the origin if there are no steps
    pub fn end(&self) -> GridCoord {
        self.steps.last().map(|s| s.coord).unwrap_or(self.origin)
    }

    /// All steps
    pub fn steps(&self) -> &[NavigationStep] {
        &self.steps
    }

    /// Step at an index
    pub fn get(&self, index: usize) -> Option<&NavigationStep> {
        self.steps.get(index)
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Does the route have no steps?
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step coordinates in order
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.steps.iter().map(|s| s.coord)
    }

    /// Waypoints in visiting order
    pub fn waypoints(&self) -> &[GridCoord] {
        &self.waypoints
    }

    /// Step index reaching each waypoint
    pub fn waypoint_steps(&self) -> &[Option<usize>] {
        &self.waypoint_steps
    }

    /// First step index at `coord`
    pub fn index_of(&self, coord: GridCoord) -> Option<usize> {
        self.steps.iter().position(|s| s.coord == coord)
    }

    /// Total walking distance in meters
    pub fn total_distance(&self) -> u32 {
        self.steps.iter().map(|s| s.distance).sum()
    }

    /// Steps left after `cursor`
    pub fn remaining_steps(&self, cursor: usize) -> usize {
        self.steps.len().saturating_sub(cursor + 1)
    }

    /// Walking distance left after `cursor`, in meters
    pub fn remaining_distance(&self, cursor: usize) -> u32 {
        self.steps
            .iter()
            .skip(cursor + 1)
            .map(|s| s.distance)
            .sum()
    }

    /// Minutes to finish from `cursor`, rounded up
    pub fn eta_minutes(&self, cursor: usize) -> u32 {
        let secs = self.remaining_steps(cursor) as u32 * SECONDS_PER_STEP;
        secs.div_ceil(60)
    }

    /// Is every step 4-adjacent to the one before it (origin included)?
    pub fn is_connected(&self) -> bool {
        let mut prev = self.origin;
        for step in &self.steps {
            if !prev.is_adjacent(&step.coord) {
                return false;
            }
            prev = step.coord;
        }
        true
    }

    /// How the route passes through step `index`.
    ///
    /// A corner is a step whose incoming move axis differs from its
    /// outgoing one.
    pub fn path_direction(&self, index: usize) -> Option<PathDirection> {
        let step = self.steps.get(index)?;
        let incoming = step.direction.is_horizontal();
        let outgoing = self
            .steps
            .get(index + 1)
            .map(|next| next.direction.is_horizontal());

        Some(match outgoing {
            Some(out) if out != incoming => PathDirection::Corner,
            _ if incoming => PathDirection::Horizontal,
            _ => PathDirection::Vertical,
        })
    }
}
