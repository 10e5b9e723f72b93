//! Spoken navigation phrases.

use serde::{Deserialize, Serialize};

use crate::pathfinding::{Direction, Route};

/// What a voice command is about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceKind {
    /// Turn-by-turn direction
    Direction,
    /// Percent-progress update
    Progress,
    /// Arrived at a product
    Arrival,
    /// Suggested extra product
    Suggestion,
    /// Traffic alert
    Traffic,
    /// Shopping done or route finished
    Completion,
    /// Answer to a spoken question
    Info,
}

/// How urgently a command should be spoken
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Background information
    Low,
    /// Regular guidance
    #[default]
    Normal,
    /// Interrupts other speech
    High,
}

/// One phrase for the speech layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommand {
    /// Category
    pub kind: VoiceKind,
    /// Text to speak
    pub message: String,
    /// Urgency
    pub priority: Priority,
    /// Route step that produced it
    pub step: Option<usize>,
    /// Product that produced it
    pub product_id: Option<String>,
}

impl VoiceCommand {
    /// Create a command with normal priority and no provenance
    pub fn new(kind: VoiceKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            priority: Priority::Normal,
            step: None,
            product_id: None,
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the producing step
    pub fn at_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    /// Set the producing product
    pub fn for_product(mut self, id: impl Into<String>) -> Self {
        self.product_id = Some(id.into());
        self
    }
}

/// Spoken phrase for one step of `direction` covering `distance` meters
pub fn direction_phrase(direction: Direction, distance: u32) -> String {
    match direction {
        Direction::Right => format!(
            "Keep moving forward and turn right at the next intersection in {}m.",
            distance
        ),
        Direction::Left => format!(
            "Keep moving forward and turn left at the next intersection in {}m.",
            distance
        ),
        Direction::Down => format!("Continue straight ahead through the aisle for {}m.", distance),
        Direction::Up => format!("Turn around and head back the way you came for {}m.", distance),
    }
}

/// Rounded percent of the route covered at step `index`
pub fn progress_percent(index: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    (100.0 * index as f64 / total as f64).round() as u32
}

/// Phrases for the route step at `index`.
///
/// Always a direction phrase; every `progress_every`th step after the first
/// also gets a progress phrase.
pub fn step_commands(route: &Route, index: usize, progress_every: usize) -> Vec<VoiceCommand> {
    let Some(step) = route.get(index) else {
        return Vec::new();
    };

    let mut commands = vec![
        VoiceCommand::new(
            VoiceKind::Direction,
            format!(
                "{}. {}",
                step.instruction,
                direction_phrase(step.direction, step.distance)
            ),
        )
        .at_step(index),
    ];

    if progress_every > 0 && index > 0 && index % progress_every == 0 {
        commands.push(
            VoiceCommand::new(
                VoiceKind::Progress,
                format!(
                    "Navigation progress: {}% complete.",
                    progress_percent(index, route.len())
                ),
            )
            .with_priority(Priority::Low)
            .at_step(index),
        );
    }

    commands
}
