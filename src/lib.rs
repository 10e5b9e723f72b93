//! # Marga-Nav: In-Store Navigation Engine
//!
//! Guides a shopper through a store: lays out a shelf grid, places the
//! shopping list on it, plans a walking route through every product and
//! simulates the shopper walking it while deriving navigation events.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga_nav::{Catalog, MargaConfig, NavigationEngine, ShoppingList};
//!
//! let catalog = Catalog::from_json(r#"[
//!     {"id": "1", "name": "Whole Milk", "category": "Dairy", "price": 3.99},
//!     {"id": "2", "name": "Sourdough Bread", "category": "Bakery", "price": 4.49}
//! ]"#)?;
//! let list = ShoppingList::from_products(catalog.iter().cloned());
//!
//! let mut engine = NavigationEngine::new(MargaConfig::load_default()?, catalog)?;
//! engine.set_shopping_list(list)?;
//! engine.start()?;
//!
//! for _ in 0..600 {
//!     engine.tick(1.0 / 60.0);
//!     for command in engine.drain_voice() {
//!         println!("{}", command.message);
//!     }
//! }
//! # Ok::<(), marga_nav::EngineError>(())
//! ```
//!
//! ## Coordinate Frame
//!
//! - **X-right**: column index, `x + 1` is one cell right
//! - **Y-down**: row index, `y + 1` is one cell towards the entrance
//! - Row 0 holds the checkout, the bottom row holds the entrance
//! - One cell is [`STEP_DISTANCE_M`] meters of walking
//!
//! ## Architecture
//!
//! - [`core`]: Coordinates, cells, products and the shopping list
//! - [`grid`]: Store layout and shelf placement
//! - [`pathfinding`]: A* search and multi-waypoint routes
//! - [`motion`]: Continuous shopper movement along a route
//! - [`events`]: Voice phrases, arrivals, suggestions, traffic
//! - [`session`]: The engine tying it all together
//! - [`config`]: YAML configuration
//!
//! ## Data Flow
//!
//! ```text
//!   ShoppingList ──► GridMapBuilder ──► Grid
//!                                        │
//!                     waypoints ──► RoutePlanner ──► Route
//!                                                     │
//!                              ticks ──► MovementSimulator ──► MovementState
//!                                                     │ step advance
//!                                                     ▼
//!                                              EventGenerator ──► voice / suggestions / alerts
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod grid;
pub mod motion;
pub mod pathfinding;
pub mod session;

pub use config::MargaConfig;
pub use core::{Catalog, Cell, CellKind, GridCoord, Product, ShoppingList, WorldPoint};
pub use error::{CatalogError, ConfigError, EngineError, LayoutError, PlanError, Result};
pub use events::{EventGenerator, ProductSuggestion, TrafficAlert, VoiceCommand, VoiceIntent};
pub use grid::{Grid, GridMapBuilder, StoreLayout};
pub use motion::{MovementSimulator, MovementState};
pub use pathfinding::{Route, RoutePlanner, STEP_DISTANCE_M};
pub use session::{NavigationEngine, NavigationStatus, Progress};
