//! Core types for the navigation engine.
//!
//! - [`GridCoord`] and [`WorldPoint`]: discrete and continuous positions
//! - [`Cell`], [`CellKind`], [`CellAnnotations`]: grid cell representation
//! - [`Product`], [`ShoppingList`], [`Catalog`]: what the shopper is looking for
//! - [`math`]: angle normalization

mod cell;
mod point;
mod product;

pub mod math;

pub use cell::{Cell, CellAnnotations, CellKind, PathDirection};
pub use math::{angle_diff, normalize_angle};
pub use point::{GridCoord, WorldPoint};
pub use product::{Catalog, Product, ShoppingItem, ShoppingList};
