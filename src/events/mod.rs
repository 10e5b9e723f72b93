//! Navigation events derived from step transitions.
//!
//! - Voice phrases for each step, with periodic progress
//! - Arrival at shopping-list products (once per product)
//! - Related-product suggestions, honoring session declines
//! - Cosmetic traffic alerts from an injectable random source
//! - Spoken request classification
//!
//! Derivation is best-effort: nothing here can fail a tick.

mod arrival;
mod generator;
mod intent;
mod suggest;
mod traffic;
mod voice;

pub use arrival::{ArrivalEvent, ArrivalTracker};
pub use generator::{
    ALL_COLLECTED_MESSAGE, EventConfig, EventGenerator, NAVIGATION_COMPLETE_MESSAGE, StepEvents,
    suggestion_prompt,
};
pub use intent::VoiceIntent;
pub use suggest::{ProductSuggestion, SuggestionEngine};
pub use traffic::{Severity, TrafficAlert, TrafficConfig, TrafficLevel, TrafficSimulator};
pub use voice::{
    Priority, VoiceCommand, VoiceKind, direction_phrase, progress_percent, step_commands,
};
