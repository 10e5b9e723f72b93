//! Store layout configuration.

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::{CellKind, GridCoord};
use crate::error::LayoutError;

/// Fixed store geometry.
///
/// Vertical aisle corridors are laid out left to right starting at
/// `first_aisle_x`, each `aisle_width` cells wide with `aisle_spacing` cells
/// between corridors. The column immediately left and right of every
/// corridor is a shelf. `cross_aisles` are full-width walkable rows.
///
/// ```text
///  x: 0 1 2 3 4 5 6 7 8 ...
///     # P = = P P = = P ...   (P = shelf, = = aisle)
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreLayout {
    /// Grid width in cells
    #[serde(default = "defaults::grid_width")]
    pub width: i32,

    /// Grid height in cells
    #[serde(default = "defaults::grid_height")]
    pub height: i32,

    /// Number of vertical aisle corridors
    #[serde(default = "defaults::aisle_count")]
    pub aisle_count: usize,

    /// Corridor width in cells
    #[serde(default = "defaults::aisle_width")]
    pub aisle_width: i32,

    /// Cells between one corridor's right edge and the next corridor
    #[serde(default = "defaults::aisle_spacing")]
    pub aisle_spacing: i32,

    /// Column of the first corridor's left edge
    #[serde(default = "defaults::first_aisle_x")]
    pub first_aisle_x: i32,

    /// Rows that are walkable across the whole store
    #[serde(default = "defaults::cross_aisles")]
    pub cross_aisles: Vec<i32>,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            width: defaults::grid_width(),
            height: defaults::grid_height(),
            aisle_count: defaults::aisle_count(),
            aisle_width: defaults::aisle_width(),
            aisle_spacing: defaults::aisle_spacing(),
            first_aisle_x: defaults::first_aisle_x(),
            cross_aisles: defaults::cross_aisles(),
        }
    }
}

impl StoreLayout {
    /// Left edge column of every corridor
    pub fn aisle_xs(&self) -> Vec<i32> {
        (0..self.aisle_count as i32)
            .map(|i| self.first_aisle_x + i * (self.aisle_width + self.aisle_spacing))
            .collect()
    }

    /// Entrance cell (bottom center)
    pub fn entrance(&self) -> GridCoord {
        GridCoord::new(self.width / 2, self.height - 1)
    }

    /// Checkout cell (top center)
    pub fn checkout(&self) -> GridCoord {
        GridCoord::new(self.width / 2, 0)
    }

    /// Check that every corridor, shelf and cross-aisle lies inside the
    /// border walls.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width < 3 || self.height < 3 {
            return Err(LayoutError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }

        for (aisle, ax) in self.aisle_xs().into_iter().enumerate() {
            let left_shelf = ax - 1;
            let right_shelf = ax + self.aisle_width;
            for x in [left_shelf, right_shelf] {
                if x < 1 || x > self.width - 2 {
                    return Err(LayoutError::AisleOutOfBounds {
                        aisle,
                        x,
                        width: self.width,
                    });
                }
            }
        }

        for &y in &self.cross_aisles {
            if y < 1 || y > self.height - 2 {
                return Err(LayoutError::CrossAisleOutOfBounds {
                    y,
                    height: self.height,
                });
            }
        }

        Ok(())
    }

    /// Cell kind at a coordinate, before any product placement
    pub fn classify(&self, coord: GridCoord, aisle_xs: &[i32]) -> CellKind {
        let GridCoord { x, y } = coord;

        if coord == self.entrance() {
            return CellKind::Entrance;
        }
        if coord == self.checkout() {
            return CellKind::Checkout;
        }
        if x == 0 || x == self.width - 1 || y == 0 || y == self.height - 1 {
            return CellKind::Wall;
        }
        if self.cross_aisles.contains(&y) {
            return CellKind::Aisle;
        }
        if aisle_xs
            .iter()
            .any(|&ax| x >= ax && x < ax + self.aisle_width)
        {
            return CellKind::Aisle;
        }
        if aisle_xs
            .iter()
            .any(|&ax| x == ax - 1 || x == ax + self.aisle_width)
        {
            return CellKind::Product;
        }
        CellKind::Empty
    }
}
