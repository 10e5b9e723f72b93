//! Navigation session: lifecycle, timers and published snapshots.

mod engine;
mod timers;

pub use engine::{NavigationEngine, NavigationStatus, Progress};
pub use timers::{TimerKind, TimerSet};
