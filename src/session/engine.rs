//! Navigation engine: one shopping session.
//!
//! Owns the grid, route, simulator, event derivation and timers. Grid and
//! route are published as `Arc` snapshots and replaced wholesale, so a
//! consumer holding one never sees it change.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::SmallRng;

use crate::config::MargaConfig;
use crate::core::{Catalog, GridCoord, Product, ShoppingList};
use crate::error::{CatalogError, EngineError, Result};
use crate::events::{
    EventGenerator, Priority, ProductSuggestion, TrafficAlert, TrafficLevel, TrafficSimulator,
    VoiceCommand, VoiceIntent, VoiceKind, progress_percent, suggestion_prompt,
};
use crate::grid::{Grid, GridMapBuilder};
use crate::motion::{AdvancePolicy, MovementSimulator, MovementState, StepAdvance};
use crate::pathfinding::{Route, RoutePlanner};

use super::timers::{TimerKind, TimerSet};

/// Navigation lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationStatus {
    /// No active route
    #[default]
    Idle,
    /// Walking the route
    Navigating,
    /// Route kept, timers and movement stopped
    Paused,
    /// Last step reached
    Complete,
}

impl NavigationStatus {
    /// Status name for logging
    pub fn name(&self) -> &'static str {
        match self {
            NavigationStatus::Idle => "Idle",
            NavigationStatus::Navigating => "Navigating",
            NavigationStatus::Paused => "Paused",
            NavigationStatus::Complete => "Complete",
        }
    }

    /// Is there a route to act on?
    pub fn has_route(&self) -> bool {
        !matches!(self, NavigationStatus::Idle)
    }
}

/// Progress snapshot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Status
    pub status: NavigationStatus,
    /// Current step index
    pub step: usize,
    /// Steps in the route
    pub total_steps: usize,
    /// Shopping-list products visited
    pub items_collected: usize,
    /// Shopping-list products
    pub total_items: usize,
    /// Percent of the route covered
    pub percent: u32,
    /// Meters left
    pub remaining_distance: u32,
    /// Minutes left, rounded up
    pub eta_minutes: u32,
}

/// A shopping session over one store
pub struct NavigationEngine {
    config: MargaConfig,
    catalog: Catalog,
    builder: GridMapBuilder,
    shopping: ShoppingList,
    /// Placed grid without navigation annotations
    base_grid: Arc<Grid>,
    /// Published, annotated grid
    grid: Arc<Grid>,
    route: Arc<Route>,
    simulator: MovementSimulator,
    events: EventGenerator,
    traffic: TrafficSimulator,
    timers: TimerSet,
    status: NavigationStatus,
    visited_cells: HashSet<GridCoord>,
    voice: VecDeque<VoiceCommand>,
    /// Waiting for the display timer
    pending_suggestions: Vec<ProductSuggestion>,
    suggestions: Vec<ProductSuggestion>,
    alerts: Vec<TrafficAlert>,
    last_direction: Option<VoiceCommand>,
    offered: Option<ProductSuggestion>,
}

impl NavigationEngine {
    /// Create an engine; fails if the store layout does not fit
    pub fn new(config: MargaConfig, catalog: Catalog) -> Result<Self> {
        let traffic = TrafficSimulator::new(config.traffic.clone(), config.layout.aisle_count);
        Self::with_traffic(config, catalog, traffic)
    }

    /// Create with an explicit traffic random source
    pub fn with_traffic_rng(config: MargaConfig, catalog: Catalog, rng: SmallRng) -> Result<Self> {
        let traffic =
            TrafficSimulator::with_rng(config.traffic.clone(), config.layout.aisle_count, rng);
        Self::with_traffic(config, catalog, traffic)
    }

    fn with_traffic(config: MargaConfig, catalog: Catalog, traffic: TrafficSimulator) -> Result<Self> {
        let builder = GridMapBuilder::new(config.layout.clone())?;
        let base_grid = Arc::new(builder.build(&mut [])?);
        info!(
            "[Engine] store {}x{}, {} shelf cells, {} catalog products",
            base_grid.width(),
            base_grid.height(),
            builder.capacity(),
            catalog.len()
        );

        Ok(Self {
            simulator: MovementSimulator::new(config.motion.clone()),
            events: EventGenerator::new(config.events.clone()),
            config,
            catalog,
            builder,
            shopping: ShoppingList::new(),
            grid: Arc::clone(&base_grid),
            base_grid,
            route: Arc::new(Route::default()),
            traffic,
            timers: TimerSet::new(),
            status: NavigationStatus::Idle,
            visited_cells: HashSet::new(),
            voice: VecDeque::new(),
            pending_suggestions: Vec::new(),
            suggestions: Vec::new(),
            alerts: Vec::new(),
            last_direction: None,
            offered: None,
        })
    }

    // ------------------------------------------------------------------
    // Shopping list
    // ------------------------------------------------------------------

    /// Replace the shopping list and place its products on shelves.
    ///
    /// Products are re-resolved against the catalog first, so locations
    /// from the caller are never trusted. Any active navigation is reset.
    pub fn set_shopping_list(&mut self, list: ShoppingList) -> Result<()> {
        let mut list = self.catalog.canonicalize(&list);
        let grid = self.builder.build_for(&mut list)?;

        self.reset();
        self.shopping = list;
        self.base_grid = Arc::new(grid);
        self.refresh_grid();
        info!("[Engine] shopping list set: {} items", self.shopping.len());
        Ok(())
    }

    /// Load the persisted `[{product, quantity}]` JSON form
    pub fn load_shopping_list_json(&mut self, json: &str) -> Result<()> {
        let list = ShoppingList::from_json(json)?;
        self.set_shopping_list(list)
    }

    /// Persisted JSON form of the shopping list
    pub fn shopping_list_json(&self) -> Result<String> {
        Ok(self.shopping.to_json()?)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Plan from the entrance through every listed product and start walking
    pub fn start(&mut self) -> Result<()> {
        if self.shopping.is_empty() {
            return Err(EngineError::EmptyShoppingList);
        }

        let entrance = self
            .base_grid
            .entrance()
            .unwrap_or_else(|| self.config.layout.entrance());
        let products: Vec<Product> = self.shopping.products().cloned().collect();
        let route = RoutePlanner::new(&self.base_grid, self.config.planner.clone()).plan_products(
            entrance,
            &products,
            &HashSet::new(),
        )?;

        self.timers.cancel_all();
        self.clear_session_state();
        self.route = Arc::new(route);
        self.simulator.reset(Arc::clone(&self.route));
        self.status = NavigationStatus::Navigating;
        info!(
            "[Engine] navigation started: {} steps, {}m",
            self.route.len(),
            self.route.total_distance()
        );

        if self.route.is_empty() {
            self.status = NavigationStatus::Complete;
            self.refresh_grid();
            return Ok(());
        }

        self.schedule_timers();
        self.on_step(0);
        Ok(())
    }

    /// Pause walking and cancel all timers
    pub fn pause(&mut self) -> Result<()> {
        if self.status != NavigationStatus::Navigating {
            return Err(EngineError::NotNavigating);
        }
        self.timers.cancel_all();
        self.status = NavigationStatus::Paused;
        info!("[Engine] paused at step {}", self.simulator.cursor());
        Ok(())
    }

    /// Resume a paused navigation
    pub fn resume(&mut self) -> Result<()> {
        if self.status != NavigationStatus::Paused {
            return Err(EngineError::NotNavigating);
        }
        self.status = NavigationStatus::Navigating;
        self.schedule_timers();
        info!("[Engine] resumed at step {}", self.simulator.cursor());
        Ok(())
    }

    /// Drop the route and all session output; keeps the shopping list
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.clear_session_state();
        self.route = Arc::new(Route::default());
        self.simulator.clear();
        self.status = NavigationStatus::Idle;
        self.refresh_grid();
        debug!("[Engine] reset");
    }

    fn clear_session_state(&mut self) {
        self.events.reset_progress();
        self.visited_cells.clear();
        self.voice.clear();
        self.pending_suggestions.clear();
        self.suggestions.clear();
        self.alerts.clear();
        self.last_direction = None;
        self.offered = None;
    }

    fn schedule_timers(&mut self) {
        if self.config.traffic.enabled {
            self.timers
                .schedule_repeating(TimerKind::Traffic, self.config.traffic.interval_secs);
        }
        if self.config.motion.advance_policy == AdvancePolicy::Interval {
            self.timers
                .schedule_repeating(TimerKind::AutoAdvance, self.config.motion.step_interval_secs);
        }
        if !self.pending_suggestions.is_empty() {
            self.timers.schedule_once(
                TimerKind::SuggestionDisplay,
                self.config.events.suggestion_delay_secs,
            );
        }
    }

    // ------------------------------------------------------------------
    // Ticking and stepping
    // ------------------------------------------------------------------

    /// Advance timers and movement by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.status != NavigationStatus::Navigating {
            return;
        }

        for timer in self.timers.advance(dt) {
            match timer {
                TimerKind::AutoAdvance => {
                    if let Some(advance) = self.simulator.advance() {
                        self.on_advance(advance);
                    }
                }
                TimerKind::SuggestionDisplay => self.show_suggestions(),
                TimerKind::Traffic => self.update_traffic(),
            }
            if self.status != NavigationStatus::Navigating {
                return;
            }
        }

        if let Some(advance) = self.simulator.tick(dt) {
            self.on_advance(advance);
        }
    }

    /// Move to the next step now
    pub fn advance_step(&mut self) -> Result<bool> {
        if !matches!(
            self.status,
            NavigationStatus::Navigating | NavigationStatus::Paused
        ) {
            return Err(EngineError::NotNavigating);
        }
        match self.simulator.advance() {
            Some(advance) => {
                self.on_advance(advance);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move back one step; visits are kept
    pub fn previous_step(&mut self) -> Result<bool> {
        if !self.status.has_route() {
            return Err(EngineError::NotNavigating);
        }
        if self.simulator.retreat().is_none() {
            return Ok(false);
        }
        if self.status == NavigationStatus::Complete {
            self.status = NavigationStatus::Navigating;
            self.schedule_timers();
        }
        self.refresh_grid();
        Ok(true)
    }

    fn on_advance(&mut self, advance: StepAdvance) {
        debug!(
            "[Engine] step {} -> {} at {}",
            advance.from, advance.to, advance.coord
        );
        self.on_step(advance.to);
    }

    fn on_step(&mut self, index: usize) {
        let route = Arc::clone(&self.route);
        if let Some(step) = route.get(index) {
            self.visited_cells.insert(step.coord);
        }

        let events = self
            .events
            .on_step(&route, index, &self.shopping, &self.catalog);

        for command in events.voice {
            if command.kind == VoiceKind::Direction {
                self.last_direction = Some(command.clone());
            }
            self.voice.push_back(command);
        }

        if !events.suggestions.is_empty() {
            // Earlier arrival still waiting: show it now rather than drop it
            if !self.pending_suggestions.is_empty() {
                self.show_suggestions();
            }
            self.pending_suggestions = events.suggestions;
            self.timers.schedule_once(
                TimerKind::SuggestionDisplay,
                self.config.events.suggestion_delay_secs,
            );
        }

        if events.route_complete {
            self.timers.cancel_all();
            // No ticks run once complete, so the display timer never fires
            if !self.pending_suggestions.is_empty() {
                self.show_suggestions();
            }
            self.status = NavigationStatus::Complete;
            info!("[Engine] navigation complete after {} steps", route.len());
        }

        self.refresh_grid();
    }

    fn show_suggestions(&mut self) {
        let shown = std::mem::take(&mut self.pending_suggestions);
        if let Some(first) = shown.first() {
            if self.config.events.voice_enabled {
                self.voice.push_back(suggestion_prompt(first));
            }
            self.offered = Some(first.clone());
        }
        self.suggestions.extend(shown);
    }

    fn update_traffic(&mut self) {
        if let Some(alert) = self.traffic.update() {
            if self.config.events.voice_enabled {
                self.voice.push_back(
                    VoiceCommand::new(VoiceKind::Traffic, alert.message())
                        .with_priority(Priority::High),
                );
            }
            self.alerts.push(alert);
        }
    }

    fn refresh_grid(&mut self) {
        self.grid = Arc::new(self.base_grid.with_navigation(
            &self.route,
            self.simulator.cursor(),
            &self.shopping,
            self.events.arrivals().visited(),
        ));
    }

    // ------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------

    /// Add one unit of a product to the list and re-plan the rest of the
    /// route from the current step, avoiding cells already walked.
    ///
    /// Nothing changes if placement or planning fails.
    pub fn accept_suggestion(&mut self, product_id: &str) -> Result<()> {
        let product = self
            .catalog
            .get(product_id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()))?;

        let mut list = self.shopping.clone();
        list.add(product.clone());
        let grid = self.builder.build_for(&mut list)?;

        let route = if self.status.has_route() && !self.route.is_empty() {
            Some(self.replan(&grid, &list)?)
        } else {
            None
        };

        self.shopping = list;
        self.base_grid = Arc::new(grid);
        self.drop_suggestion(product_id);
        self.events.rearm_completion(&self.shopping);

        if let Some(route) = route {
            self.route = Arc::new(route);
            self.simulator.replace_route(Arc::clone(&self.route));
            if self.status == NavigationStatus::Complete {
                self.status = NavigationStatus::Navigating;
                self.schedule_timers();
            }
        }

        info!("[Engine] added '{}' to shopping list", product.name);
        self.refresh_grid();
        Ok(())
    }

    fn replan(&self, grid: &Grid, list: &ShoppingList) -> Result<Route> {
        let cursor = self.simulator.cursor();
        let current = self
            .route
            .get(cursor)
            .map(|s| s.coord)
            .unwrap_or(self.route.origin());
        let remaining: Vec<Product> = list
            .products()
            .filter(|p| !self.events.arrivals().is_visited(&p.id))
            .cloned()
            .collect();

        let tail = RoutePlanner::new(grid, self.config.planner.clone()).plan_products(
            current,
            &remaining,
            &self.visited_cells,
        )?;
        debug!(
            "[Engine] re-planned from step {} at {}: {} new steps",
            cursor,
            current,
            tail.len()
        );
        Ok(self.route.spliced(cursor, &tail))
    }

    /// Never suggest this product again this session
    pub fn decline_suggestion(&mut self, product_id: &str) {
        self.events.decline(product_id);
        self.drop_suggestion(product_id);
        debug!("[Engine] declined '{}'", product_id);
    }

    fn drop_suggestion(&mut self, product_id: &str) {
        self.suggestions.retain(|s| s.product.id != product_id);
        self.pending_suggestions.retain(|s| s.product.id != product_id);
        if self
            .offered
            .as_ref()
            .is_some_and(|s| s.product.id == product_id)
        {
            self.offered = None;
        }
    }

    // ------------------------------------------------------------------
    // Voice interaction
    // ------------------------------------------------------------------

    /// Answer a spoken request; the answer is also queued for speech
    pub fn respond_to(&mut self, intent: VoiceIntent) -> VoiceCommand {
        debug!("[Engine] voice intent: {}", intent.name());
        let answer = match intent {
            VoiceIntent::Accept => self.answer_accept(),
            VoiceIntent::Decline => match self.offered.clone() {
                Some(s) => {
                    self.decline_suggestion(&s.product.id);
                    info_command(format!(
                        "Okay, I won't suggest {} again.",
                        s.product.name
                    ))
                }
                None => info_command("There is no suggestion to skip."),
            },
            VoiceIntent::Stop => match self.pause() {
                Ok(()) => info_command("Navigation paused."),
                Err(_) => info_command("Navigation is not active."),
            },
            VoiceIntent::Repeat => self
                .last_direction
                .clone()
                .unwrap_or_else(|| info_command("No directions yet.")),
            VoiceIntent::Traffic => {
                let level = self.traffic.level();
                info_command(format!(
                    "Traffic is {} ({}% congestion).",
                    level.name(),
                    level.congestion()
                ))
            }
            VoiceIntent::Distance => info_command(format!(
                "{}m remaining.",
                self.route.remaining_distance(self.simulator.cursor())
            )),
            VoiceIntent::Eta => info_command(format!(
                "About {} minutes remaining.",
                self.route.eta_minutes(self.simulator.cursor())
            )),
            VoiceIntent::Suggest => {
                let mut unique: Vec<&str> = Vec::new();
                for name in self
                    .offered
                    .iter()
                    .chain(self.suggestions.iter())
                    .map(|s| s.product.name.as_str())
                {
                    if !unique.contains(&name) {
                        unique.push(name);
                    }
                }
                if unique.is_empty() {
                    info_command("No suggestions right now.")
                } else {
                    info_command(format!("You might like: {}.", unique.join(", ")))
                }
            }
            VoiceIntent::Help => info_command(
                "You can say: yes, no, stop, repeat, traffic, distance, ETA, suggest, or help.",
            ),
            VoiceIntent::Unknown => info_command("Sorry, I didn't catch that."),
        };
        self.voice.push_back(answer.clone());
        answer
    }

    fn answer_accept(&mut self) -> VoiceCommand {
        let Some(offered) = self.offered.clone() else {
            return info_command("There is no suggestion to add.");
        };
        match self.accept_suggestion(&offered.product.id) {
            Ok(()) => info_command(format!(
                "Added {} to your shopping list.",
                offered.product.name
            )),
            Err(e) => {
                warn!(
                    "[Engine] could not add '{}': {} ({})",
                    offered.product.name,
                    e,
                    e.code()
                );
                info_command(format!("Sorry, I couldn't add {}.", offered.product.name))
            }
        }
    }

    // ------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------

    /// Take all queued voice commands
    pub fn drain_voice(&mut self) -> Vec<VoiceCommand> {
        self.voice.drain(..).collect()
    }

    /// Take all displayed suggestions
    pub fn drain_suggestions(&mut self) -> Vec<ProductSuggestion> {
        std::mem::take(&mut self.suggestions)
    }

    /// Take all traffic alerts
    pub fn drain_alerts(&mut self) -> Vec<TrafficAlert> {
        std::mem::take(&mut self.alerts)
    }

    /// Suggestion the shopper can answer yes/no to
    pub fn offered_suggestion(&self) -> Option<&ProductSuggestion> {
        self.offered.as_ref()
    }

    /// Annotated grid snapshot
    pub fn grid(&self) -> Arc<Grid> {
        Arc::clone(&self.grid)
    }

    /// Route snapshot
    pub fn route(&self) -> Arc<Route> {
        Arc::clone(&self.route)
    }

    /// Kinematic snapshot
    pub fn movement(&self) -> MovementState {
        self.simulator.state()
    }

    /// Current step index
    pub fn current_step(&self) -> usize {
        self.simulator.cursor()
    }

    /// Lifecycle status
    pub fn status(&self) -> NavigationStatus {
        self.status
    }

    /// Shopping list with shelf placements
    pub fn shopping_list(&self) -> &ShoppingList {
        &self.shopping
    }

    /// Product catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Configuration
    pub fn config(&self) -> &MargaConfig {
        &self.config
    }

    /// Visited product ids
    pub fn visited_products(&self) -> &HashSet<String> {
        self.events.arrivals().visited()
    }

    /// Cells reached so far
    pub fn visited_cells(&self) -> &HashSet<GridCoord> {
        &self.visited_cells
    }

    /// Current traffic level
    pub fn traffic_level(&self) -> TrafficLevel {
        self.traffic.level()
    }

    /// Progress snapshot
    pub fn progress(&self) -> Progress {
        let cursor = self.simulator.cursor();
        let total_steps = self.route.len();
        let percent = match self.status {
            NavigationStatus::Idle => 0,
            NavigationStatus::Complete => 100,
            _ if total_steps == 0 => 0,
            _ => progress_percent(cursor + 1, total_steps),
        };
        Progress {
            status: self.status,
            step: cursor,
            total_steps,
            items_collected: self
                .shopping
                .products()
                .filter(|p| self.events.arrivals().is_visited(&p.id))
                .count(),
            total_items: self.shopping.len(),
            percent,
            remaining_distance: self.route.remaining_distance(cursor),
            eta_minutes: self.route.eta_minutes(cursor),
        }
    }
}

fn info_command(message: impl Into<String>) -> VoiceCommand {
    VoiceCommand::new(VoiceKind::Info, message)
}
