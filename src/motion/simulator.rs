//! Shopper movement simulation.
//!
//! The step cursor is the single source of truth for progress along the
//! route. The continuous position only interpolates toward it:
//!
//! - [`AdvancePolicy::Arrival`]: the shopper walks toward the step after
//!   the cursor and the cursor advances when the shopper gets there.
//! - [`AdvancePolicy::Interval`]: the cursor is advanced externally (a
//!   fixed-interval timer); the shopper walks toward the cursor step and
//!   waits there.

use std::sync::Arc;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::{GridCoord, WorldPoint, angle_diff, normalize_angle};
use crate::pathfinding::Route;

use super::state::{MotionPhase, MovementState, StepAdvance};

/// Which event moves the step cursor forward
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvancePolicy {
    /// Reaching the next step advances the cursor
    #[default]
    Arrival,
    /// An external fixed-interval timer advances the cursor
    Interval,
}

/// Kinematic settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Simulation rate in Hz
    #[serde(default = "defaults::tick_hz")]
    pub tick_hz: f32,

    /// Distance (cells) below which a step counts as reached
    #[serde(default = "defaults::arrival_threshold")]
    pub arrival_threshold: f32,

    /// Fraction of the heading error corrected per tick
    #[serde(default = "defaults::heading_ease")]
    pub heading_ease: f32,

    /// Heading error (radians) below which the shopper speeds up
    #[serde(default = "defaults::alignment_threshold")]
    pub alignment_threshold: f32,

    /// Maximum speed (cells/s)
    #[serde(default = "defaults::max_speed")]
    pub max_speed: f32,

    /// Acceleration while aligned (cells/s²)
    #[serde(default = "defaults::acceleration")]
    pub acceleration: f32,

    /// Deceleration while turning (cells/s²)
    #[serde(default = "defaults::deceleration")]
    pub deceleration: f32,

    /// Cursor advance policy
    #[serde(default)]
    pub advance_policy: AdvancePolicy,

    /// Seconds between cursor advances under [`AdvancePolicy::Interval`]
    #[serde(default = "defaults::step_interval_secs")]
    pub step_interval_secs: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tick_hz: defaults::tick_hz(),
            arrival_threshold: defaults::arrival_threshold(),
            heading_ease: defaults::heading_ease(),
            alignment_threshold: defaults::alignment_threshold(),
            max_speed: defaults::max_speed(),
            acceleration: defaults::acceleration(),
            deceleration: defaults::deceleration(),
            advance_policy: AdvancePolicy::default(),
            step_interval_secs: defaults::step_interval_secs(),
        }
    }
}

impl MotionConfig {
    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz.max(1.0)
    }
}

/// Owns the step cursor and the continuous shopper state for one route
#[derive(Clone, Debug)]
pub struct MovementSimulator {
    config: MotionConfig,
    route: Arc<Route>,
    cursor: usize,
    state: MovementState,
    phase: MotionPhase,
}

impl MovementSimulator {
    /// Create an idle simulator
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            route: Arc::new(Route::default()),
            cursor: 0,
            state: MovementState::default(),
            phase: MotionPhase::Idle,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(MotionConfig::default())
    }

    /// Configuration
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Current route
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    /// Authoritative step index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Kinematic snapshot
    pub fn state(&self) -> MovementState {
        self.state
    }

    /// Current phase
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Install a route and place the shopper on its first step, facing +x
    pub fn reset(&mut self, route: Arc<Route>) {
        self.cursor = 0;
        self.state = MovementState::at(route.get(0).map(|s| s.coord).unwrap_or(route.origin()));
        self.route = route;
        self.update_phase();
        debug!(
            "[Motion] reset: {} steps, phase={}",
            self.route.len(),
            self.phase.name()
        );
    }

    /// Swap in a route that shares every step up to the cursor with the
    /// current one. Position, heading and speed are kept.
    pub fn replace_route(&mut self, route: Arc<Route>) {
        self.route = route;
        self.cursor = self.cursor.min(self.route.len().saturating_sub(1));
        self.update_phase();
    }

    /// Stop and drop the route
    pub fn clear(&mut self) {
        self.route = Arc::new(Route::default());
        self.cursor = 0;
        self.state = MovementState::default();
        self.phase = MotionPhase::Idle;
    }

    /// Step the shopper is currently walking toward
    fn target_index(&self) -> usize {
        match self.config.advance_policy {
            AdvancePolicy::Arrival => self.cursor + 1,
            AdvancePolicy::Interval => self.cursor,
        }
    }

    fn update_phase(&mut self) {
        let last = match self.route.len() {
            0 => {
                self.phase = MotionPhase::Idle;
                return;
            }
            n => n - 1,
        };

        let target = self.target_index();
        self.phase = if target > last || (self.cursor == last && self.at(self.route_coord(last))) {
            MotionPhase::Arrived
        } else {
            MotionPhase::Approaching { step: target }
        };
    }

    fn route_coord(&self, index: usize) -> GridCoord {
        self.route.get(index).map(|s| s.coord).unwrap_or(self.route.origin())
    }

    fn at(&self, coord: GridCoord) -> bool {
        self.state.position.distance(&coord.to_world()) < self.config.arrival_threshold
    }

    fn stop(&mut self) {
        self.state.speed = 0.0;
        self.state.moving = false;
    }

    fn snap_to_cursor(&mut self) {
        self.state.position = self.route_coord(self.cursor).to_world();
        self.stop();
    }

    fn advance_record(&self, from: usize) -> StepAdvance {
        StepAdvance {
            from,
            to: self.cursor,
            coord: self.route_coord(self.cursor),
            is_final: self.cursor + 1 >= self.route.len(),
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Returns the cursor advance when the shopper reaches the next step
    /// under [`AdvancePolicy::Arrival`].
    pub fn tick(&mut self, dt: f32) -> Option<StepAdvance> {
        let MotionPhase::Approaching { step } = self.phase else {
            self.stop();
            return None;
        };

        let target = self.route_coord(step).to_world();
        let distance = self.state.position.distance(&target);

        if distance < self.config.arrival_threshold {
            return self.on_reached(step, target);
        }

        let target_heading = self.state.position.angle_to(&target);
        let error = angle_diff(self.state.heading, target_heading);
        self.state.heading = normalize_angle(self.state.heading + error * self.config.heading_ease);

        self.state.speed = if error.abs() < self.config.alignment_threshold {
            (self.state.speed + self.config.acceleration * dt).min(self.config.max_speed)
        } else {
            (self.state.speed - self.config.deceleration * dt).max(0.0)
        };

        if self.state.speed > 0.0 {
            // Never carry past the target in one tick
            let travel = (self.state.speed * dt).min(distance);
            self.state.position = self.state.position.point_at(self.state.heading, travel);
        }
        self.state.moving = self.state.speed > 0.0;

        trace!(
            "[Motion] step={} pos=({:.2},{:.2}) heading={:.2} speed={:.2}",
            step,
            self.state.position.x,
            self.state.position.y,
            self.state.heading,
            self.state.speed
        );
        None
    }

    fn on_reached(&mut self, step: usize, target: WorldPoint) -> Option<StepAdvance> {
        match self.config.advance_policy {
            AdvancePolicy::Arrival => {
                let from = self.cursor;
                self.cursor = step;
                self.state.position = target;
                let advance = self.advance_record(from);
                self.update_phase();
                if advance.is_final {
                    self.stop();
                }
                Some(advance)
            }
            AdvancePolicy::Interval => {
                // Wait on the cursor step for the next timer advance
                self.stop();
                self.update_phase();
                None
            }
        }
    }

    /// Move the cursor forward one step.
    ///
    /// Under [`AdvancePolicy::Arrival`] the shopper is snapped onto the new
    /// step; under [`AdvancePolicy::Interval`] the shopper walks there.
    pub fn advance(&mut self) -> Option<StepAdvance> {
        if self.cursor + 1 >= self.route.len() {
            return None;
        }
        let from = self.cursor;
        self.cursor += 1;
        if self.config.advance_policy == AdvancePolicy::Arrival {
            self.snap_to_cursor();
        }
        self.update_phase();
        Some(self.advance_record(from))
    }

    /// Move the cursor back one step, snapping the shopper onto it
    pub fn retreat(&mut self) -> Option<usize> {
        if self.cursor == 0 || self.route.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.snap_to_cursor();
        self.update_phase();
        Some(self.cursor)
    }
}
