//! Continuous shopper movement along a route.
//!
//! [`MovementSimulator`] owns the authoritative step cursor and animates a
//! sub-cell position toward it each tick.

mod simulator;
mod state;

pub use simulator::{AdvancePolicy, MotionConfig, MovementSimulator};
pub use state::{MotionPhase, MovementState, StepAdvance};
