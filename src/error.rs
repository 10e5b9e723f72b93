//! Error types for MargaNav
//!
//! Every expected failure is a value, never a panic. The UI shell decides
//! how to present them.

use crate::core::GridCoord;

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;

/// Store layout and product placement errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Grid is too small to hold a border plus an interior
    #[error("Grid too small: {width}x{height} (minimum 3x3)")]
    GridTooSmall {
        /// Configured width in cells
        width: i32,
        /// Configured height in cells
        height: i32,
    },

    /// An aisle corridor or one of its shelves falls outside the grid interior
    #[error("Aisle {aisle} does not fit: column {x} outside interior of width {width}")]
    AisleOutOfBounds {
        /// Aisle index (left to right)
        aisle: usize,
        /// Offending column
        x: i32,
        /// Grid width
        width: i32,
    },

    /// A cross-aisle row falls outside the grid interior
    #[error("Cross-aisle row {y} outside interior of height {height}")]
    CrossAisleOutOfBounds {
        /// Offending row
        y: i32,
        /// Grid height
        height: i32,
    },

    /// More products than shelf cells
    #[error("Shelf capacity exceeded: {requested} products requested, {available} shelf cells available")]
    CapacityExceeded {
        /// Number of products to place
        requested: usize,
        /// Number of shelf cells in the layout
        available: usize,
    },

    /// Unknown character in an ASCII grid
    #[error("Invalid cell character '{ch}' at ({x}, {y})")]
    InvalidCellChar {
        /// The character
        ch: char,
        /// Column
        x: i32,
        /// Row
        y: i32,
    },

    /// ASCII grid rows differ in length
    #[error("Ragged ASCII grid: row {row} has {len} cells, expected {expected}")]
    RaggedRows {
        /// Row index
        row: usize,
        /// Length of that row
        len: usize,
        /// Length of the first row
        expected: usize,
    },
}

/// Route planning errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// No path to a waypoint, even with the forbidden cells allowed
    #[error("Waypoint {waypoint_index} at {target} is unreachable")]
    Unreachable {
        /// Index into the waypoint list
        waypoint_index: usize,
        /// Waypoint coordinate
        target: GridCoord,
    },

    /// A product has no usable location
    #[error("Product '{name}' ({product_id}) has no valid location")]
    InvalidLocation {
        /// Product id
        product_id: String,
        /// Product name
        name: String,
    },

    /// Start coordinate lies outside the grid
    #[error("Start position {0} is outside the grid")]
    StartOutOfBounds(GridCoord),
}

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Config I/O error: {0}")]
    Io(String),

    /// YAML parsing error
    #[error("Config parse error: {0}")]
    Parse(String),
}

/// Catalog and shopping list errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// JSON parse or serialize error
    #[error("Shopping list JSON error: {0}")]
    Json(String),

    /// Product id not present in the catalog
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Json(e.to_string())
    }
}

/// Navigation engine error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Layout or placement error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Route planning error
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Navigation requested with nothing to find
    #[error("Shopping list is empty")]
    EmptyShoppingList,

    /// Operation requires an active or paused navigation
    #[error("Navigation is not active")]
    NotNavigating,
}

impl EngineError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Layout(LayoutError::CapacityExceeded { .. }) => "CAPACITY_EXCEEDED",
            Self::Layout(_) => "LAYOUT",
            Self::Plan(PlanError::Unreachable { .. }) => "UNREACHABLE",
            Self::Plan(PlanError::InvalidLocation { .. }) => "INVALID_LOCATION",
            Self::Plan(PlanError::StartOutOfBounds(_)) => "START_OUT_OF_BOUNDS",
            Self::Config(_) => "CONFIG",
            Self::Catalog(_) => "CATALOG",
            Self::EmptyShoppingList => "EMPTY_LIST",
            Self::NotNavigating => "NOT_NAVIGATING",
        }
    }
}
