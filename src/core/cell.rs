//! Cell types for the store grid.
//!
//! A cell's [`CellKind`] is fixed when the grid is built. Everything that
//! changes during navigation lives in [`CellAnnotations`], which is always
//! recomputed from scratch rather than patched.

use serde::{Deserialize, Serialize};

use super::point::GridCoord;
use super::product::Product;

/// What occupies a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CellKind {
    /// Open floor
    #[default]
    Empty = 0,
    /// Shelf cell that may hold a product
    Product = 1,
    /// Aisle corridor or cross-aisle
    Aisle = 2,
    /// Store boundary
    Wall = 3,
    /// Store entrance (route start)
    Entrance = 4,
    /// Checkout counter
    Checkout = 5,
}

impl CellKind {
    /// Can the shopper walk through this cell?
    ///
    /// Shelves are only entered when they are the current goal, which the
    /// planner handles separately.
    #[inline]
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            CellKind::Empty | CellKind::Aisle | CellKind::Entrance | CellKind::Checkout
        )
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Product => 'P',
            CellKind::Aisle => '=',
            CellKind::Wall => '#',
            CellKind::Entrance => 'E',
            CellKind::Checkout => 'C',
        }
    }

    /// Parse the [`as_char`](Self::as_char) representation
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellKind::Empty),
            'P' => Some(CellKind::Product),
            '=' => Some(CellKind::Aisle),
            '#' => Some(CellKind::Wall),
            'E' => Some(CellKind::Entrance),
            'C' => Some(CellKind::Checkout),
            _ => None,
        }
    }
}

/// Shape of the route through a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDirection {
    /// Route passes left/right
    Horizontal,
    /// Route passes up/down
    Vertical,
    /// Route turns in this cell
    Corner,
}

/// Per-navigation flags, rebuilt on every route or step change
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellAnnotations {
    /// Cell lies on the active route
    pub on_path: bool,
    /// Shopper's current step
    pub is_current: bool,
    /// How the route passes through this cell
    pub path_direction: Option<PathDirection>,
    /// Holds a product from the shopping list
    pub in_shopping_list: bool,
    /// Holds a product that has been collected
    pub reached: bool,
}

/// A single cell in the store grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell position
    pub coord: GridCoord,
    /// Cell kind (immutable after construction)
    pub kind: CellKind,
    /// Product stocked on this shelf, if any
    pub product: Option<Product>,
    /// Dynamic navigation flags
    #[serde(default)]
    pub annotations: CellAnnotations,
}

impl Cell {
    /// Create a cell with a kind and no product
    #[inline]
    pub fn new(coord: GridCoord, kind: CellKind) -> Self {
        Self {
            coord,
            kind,
            product: None,
            annotations: CellAnnotations::default(),
        }
    }

    /// Is this cell walkable?
    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }
}
