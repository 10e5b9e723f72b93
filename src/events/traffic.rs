//! Synthetic in-store traffic.
//!
//! Purely cosmetic: the level cycles at random and never touches the route.
//! The random source is injectable so tests can make it deterministic.

use log::debug;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Congestion level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    /// No congestion
    #[default]
    Clear,
    /// Some congestion
    Moderate,
    /// Heavy congestion
    Heavy,
}

impl TrafficLevel {
    const ALL: [TrafficLevel; 3] = [TrafficLevel::Clear, TrafficLevel::Moderate, TrafficLevel::Heavy];

    /// Congestion percentage
    pub fn congestion(self) -> u8 {
        match self {
            TrafficLevel::Clear => 0,
            TrafficLevel::Moderate => 50,
            TrafficLevel::Heavy => 100,
        }
    }

    /// Alert severity for this level
    pub fn severity(self) -> Severity {
        match self {
            TrafficLevel::Clear => Severity::Low,
            TrafficLevel::Moderate => Severity::Medium,
            TrafficLevel::Heavy => Severity::High,
        }
    }

    /// Descriptions an alert may use
    pub fn descriptions(self) -> &'static [&'static str] {
        match self {
            TrafficLevel::Clear => &[
                "Smooth shopping experience",
                "No congestion detected",
                "Clear aisles ahead",
            ],
            TrafficLevel::Moderate => &[
                "Moderate foot traffic",
                "Some congestion in aisles",
                "Slight delays possible",
            ],
            TrafficLevel::Heavy => &[
                "Heavy congestion detected",
                "Significant delays expected",
                "Consider alternative routes",
            ],
        }
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            TrafficLevel::Clear => "clear",
            TrafficLevel::Moderate => "moderate",
            TrafficLevel::Heavy => "heavy",
        }
    }
}

/// Alert severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Low,
    /// Worth mentioning
    Medium,
    /// Interrupts guidance
    High,
}

/// A congestion alert
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficAlert {
    /// Level that produced the alert
    pub level: TrafficLevel,
    /// Severity
    pub severity: Severity,
    /// Affected aisle, 1-based
    pub aisle: usize,
    /// Estimated delay in minutes, 1..=5
    pub delay_minutes: u32,
    /// Short description
    pub description: String,
    /// Congestion percentage
    pub congestion: u8,
}

impl TrafficAlert {
    /// Spoken form
    pub fn message(&self) -> String {
        format!(
            "Heavy traffic detected in aisle {}. {}. Expect about {} min delay.",
            self.aisle, self.description, self.delay_minutes
        )
    }
}

/// Traffic simulation settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficConfig {
    /// Run the simulation at all
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Seconds between level changes
    #[serde(default = "defaults::traffic_interval_secs")]
    pub interval_secs: f32,

    /// Chance that a heavy level raises an alert
    #[serde(default = "defaults::heavy_alert_probability")]
    pub heavy_alert_probability: f64,

    /// RNG seed; 0 draws from entropy
    #[serde(default)]
    pub seed: u64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            interval_secs: defaults::traffic_interval_secs(),
            heavy_alert_probability: defaults::heavy_alert_probability(),
            seed: 0,
        }
    }
}

/// Random traffic generator
#[derive(Clone, Debug)]
pub struct TrafficSimulator {
    config: TrafficConfig,
    aisle_count: usize,
    level: TrafficLevel,
    rng: SmallRng,
}

impl TrafficSimulator {
    /// Create a simulator for a store with `aisle_count` aisles.
    ///
    /// If `config.seed` is 0, uses random entropy; otherwise results are
    /// reproducible.
    pub fn new(config: TrafficConfig, aisle_count: usize) -> Self {
        let rng = if config.seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(config.seed)
        };
        Self::with_rng(config, aisle_count, rng)
    }

    /// Create with an explicit random source
    pub fn with_rng(config: TrafficConfig, aisle_count: usize, rng: SmallRng) -> Self {
        Self {
            config,
            aisle_count: aisle_count.max(1),
            level: TrafficLevel::Clear,
            rng,
        }
    }

    /// Configuration
    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    /// Current level
    pub fn level(&self) -> TrafficLevel {
        self.level
    }

    /// Draw a new level; heavy traffic may raise an alert
    pub fn update(&mut self) -> Option<TrafficAlert> {
        self.level = TrafficLevel::ALL[self.rng.gen_range(0..TrafficLevel::ALL.len())];

        let probability = self.config.heavy_alert_probability.clamp(0.0, 1.0);
        if self.level != TrafficLevel::Heavy || !self.rng.gen_bool(probability) {
            return None;
        }

        let descriptions = self.level.descriptions();
        let alert = TrafficAlert {
            level: self.level,
            severity: self.level.severity(),
            aisle: self.rng.gen_range(1..=self.aisle_count),
            delay_minutes: self.rng.gen_range(1..=5),
            description: descriptions[self.rng.gen_range(0..descriptions.len())].to_string(),
            congestion: self.level.congestion(),
        };
        debug!(
            "[Traffic] alert: aisle {} {} (+{} min)",
            alert.aisle, alert.description, alert.delay_minutes
        );
        Some(alert)
    }
}
