//! Event derivation from step transitions.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::{Catalog, ShoppingList};
use crate::pathfinding::Route;

use super::arrival::{ArrivalEvent, ArrivalTracker};
use super::suggest::{ProductSuggestion, SuggestionEngine};
use super::voice::{Priority, VoiceCommand, VoiceKind, step_commands};

/// Spoken when every shopping-list product has been visited
pub const ALL_COLLECTED_MESSAGE: &str = "All items collected! Proceed to checkout.";

/// Spoken at the last route step
pub const NAVIGATION_COMPLETE_MESSAGE: &str = "Navigation complete";

/// Event derivation settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Emit voice commands
    #[serde(default = "defaults::enabled")]
    pub voice_enabled: bool,

    /// Emit a progress phrase every this many steps (0 = never)
    #[serde(default = "defaults::progress_every")]
    pub progress_every: usize,

    /// Suggestions kept per arrival
    #[serde(default = "defaults::max_suggestions")]
    pub max_suggestions: usize,

    /// Delay before suggestions are shown
    #[serde(default = "defaults::suggestion_delay_secs")]
    pub suggestion_delay_secs: f32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            voice_enabled: defaults::enabled(),
            progress_every: defaults::progress_every(),
            max_suggestions: defaults::max_suggestions(),
            suggestion_delay_secs: defaults::suggestion_delay_secs(),
        }
    }
}

/// Everything derived from reaching one step
#[derive(Clone, Debug, Default)]
pub struct StepEvents {
    /// Phrases to speak, in order
    pub voice: Vec<VoiceCommand>,
    /// First visit to a shopping-list product
    pub arrival: Option<ArrivalEvent>,
    /// Suggestions triggered by the arrival
    pub suggestions: Vec<ProductSuggestion>,
    /// This step completed the shopping list
    pub all_collected: bool,
    /// This is the last route step
    pub route_complete: bool,
}

/// Derives voice, arrival and suggestion events from step transitions
#[derive(Clone, Debug)]
pub struct EventGenerator {
    config: EventConfig,
    arrivals: ArrivalTracker,
    suggester: SuggestionEngine,
    all_collected: bool,
}

impl EventGenerator {
    /// Create a generator
    pub fn new(config: EventConfig) -> Self {
        let suggester = SuggestionEngine::new(config.max_suggestions);
        Self {
            config,
            arrivals: ArrivalTracker::new(),
            suggester,
            all_collected: false,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(EventConfig::default())
    }

    /// Configuration
    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// Arrival tracking state
    pub fn arrivals(&self) -> &ArrivalTracker {
        &self.arrivals
    }

    /// Never suggest a product again this session
    pub fn decline(&mut self, id: impl Into<String>) {
        self.suggester.decline(id);
    }

    /// Has a product been declined?
    pub fn is_declined(&self, id: &str) -> bool {
        self.suggester.is_declined(id)
    }

    /// Forget visits and the completion announcement.
    ///
    /// Declines are kept: they last for the whole session.
    pub fn reset_progress(&mut self) {
        self.arrivals.clear();
        self.all_collected = false;
    }

    /// Allow the completion announcement again once the list grows past
    /// what has been visited
    pub fn rearm_completion(&mut self, shopping: &ShoppingList) {
        if self.all_collected && !self.arrivals.all_collected(shopping) {
            debug!("[Events] shopping list grew, completion re-armed");
            self.all_collected = false;
        }
    }

    /// Start a fresh session
    pub fn clear(&mut self) {
        self.reset_progress();
        self.suggester.clear();
    }

    /// Derive events for reaching route step `index`
    pub fn on_step(
        &mut self,
        route: &Route,
        index: usize,
        shopping: &ShoppingList,
        catalog: &Catalog,
    ) -> StepEvents {
        let Some(step) = route.get(index) else {
            return StepEvents::default();
        };

        let mut events = StepEvents::default();
        if self.config.voice_enabled {
            events.voice = step_commands(route, index, self.config.progress_every);
        }

        if let Some(arrival) = self.arrivals.check(step.coord, index, shopping) {
            info!(
                "[Events] arrived at '{}' ({}) on step {}",
                arrival.product.name, arrival.product.id, index
            );
            events.voice.push(
                VoiceCommand::new(
                    VoiceKind::Arrival,
                    format!(
                        "You have arrived at {}. Look for the product on your {} side.",
                        arrival.product.name, step.direction
                    ),
                )
                .with_priority(Priority::High)
                .at_step(index)
                .for_product(arrival.product.id.clone()),
            );
            events.suggestions = self.suggester.suggest(&arrival.product, catalog, shopping);
            debug!(
                "[Events] {} suggestions after '{}'",
                events.suggestions.len(),
                arrival.product.name
            );
            events.arrival = Some(arrival);
        }

        if !self.all_collected && self.arrivals.all_collected(shopping) {
            self.all_collected = true;
            events.all_collected = true;
            events
                .voice
                .push(VoiceCommand::new(VoiceKind::Completion, ALL_COLLECTED_MESSAGE).at_step(index));
        }

        if index + 1 == route.len() {
            events.route_complete = true;
            events.voice.push(
                VoiceCommand::new(VoiceKind::Completion, NAVIGATION_COMPLETE_MESSAGE).at_step(index),
            );
        }

        events
    }
}

/// Spoken offer for a suggestion
pub fn suggestion_prompt(suggestion: &ProductSuggestion) -> VoiceCommand {
    VoiceCommand::new(
        VoiceKind::Suggestion,
        format!(
            "Would you like to add {}? {}, {}m away.",
            suggestion.product.name, suggestion.reason, suggestion.distance
        ),
    )
    .for_product(suggestion.product.id.clone())
}
