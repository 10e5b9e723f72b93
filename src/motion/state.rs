//! Movement state and simulator phases.

use serde::{Deserialize, Serialize};

use crate::core::{GridCoord, WorldPoint};

/// Continuous shopper kinematics, published as a snapshot
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    /// Sub-cell position in grid units
    pub position: WorldPoint,
    /// Heading in radians, (-π, π]
    pub heading: f32,
    /// Speed in cells per second, [0, max_speed]
    pub speed: f32,
    /// Is the shopper currently moving?
    pub moving: bool,
}

impl MovementState {
    /// Stationary state at a cell, facing +x
    pub fn at(coord: GridCoord) -> Self {
        Self {
            position: coord.to_world(),
            ..Default::default()
        }
    }

    /// Nearest grid cell
    pub fn cell(&self) -> GridCoord {
        self.position.to_grid()
    }
}

/// Simulator phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionPhase {
    /// No route installed
    #[default]
    Idle,

    /// Moving toward a route step
    Approaching {
        /// Index of the step being approached
        step: usize,
    },

    /// At the last step of the route
    Arrived,
}

impl MotionPhase {
    /// Is the shopper heading somewhere?
    pub fn is_active(&self) -> bool {
        matches!(self, MotionPhase::Approaching { .. })
    }

    /// Phase name for logging
    pub fn name(&self) -> &'static str {
        match self {
            MotionPhase::Idle => "Idle",
            MotionPhase::Approaching { .. } => "Approaching",
            MotionPhase::Arrived => "Arrived",
        }
    }
}

/// Emitted whenever the authoritative step cursor moves forward
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepAdvance {
    /// Previous cursor
    pub from: usize,
    /// New cursor
    pub to: usize,
    /// Cell of the new cursor step
    pub coord: GridCoord,
    /// Is `to` the last step of the route?
    pub is_final: bool,
}
