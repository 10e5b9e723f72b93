//! Unified configuration loading for MargaNav.
//!
//! Loads all configuration from a single YAML file. Every field has a
//! default, so a partial file (or none at all) is valid.

pub(crate) mod defaults;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::events::{EventConfig, TrafficConfig};
use crate::grid::StoreLayout;
use crate::motion::MotionConfig;
use crate::pathfinding::PlannerConfig;

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "configs/marga.yaml";

/// Full MargaNav configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MargaConfig {
    /// Store geometry
    #[serde(default)]
    pub layout: StoreLayout,

    /// Route planning
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Shopper kinematics and step advance
    #[serde(default)]
    pub motion: MotionConfig,

    /// Voice, arrival and suggestion events
    #[serde(default)]
    pub events: EventConfig,

    /// Synthetic traffic
    #[serde(default)]
    pub traffic: TrafficConfig,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path, or defaults if it is absent
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
