//! Store grid construction and product placement.

use std::collections::HashSet;

use log::{debug, info};

use crate::core::{CellKind, GridCoord, Product, ShoppingList};
use crate::error::LayoutError;

use super::layout::StoreLayout;
use super::storage::Grid;

/// Deterministic store grid builder.
///
/// Same layout and same product list (ids and order) always give the same
/// grid and the same shelf assignments.
#[derive(Clone, Debug)]
pub struct GridMapBuilder {
    layout: StoreLayout,
    aisle_xs: Vec<i32>,
    shelves: Vec<GridCoord>,
}

impl GridMapBuilder {
    /// Create a builder, validating the layout up front
    pub fn new(layout: StoreLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        let aisle_xs = layout.aisle_xs();
        let shelves = Self::shelf_order(&layout, &aisle_xs);
        debug!(
            "[GridMapBuilder] {}x{} store, {} aisles, {} shelf cells",
            layout.width,
            layout.height,
            aisle_xs.len(),
            shelves.len()
        );
        Ok(Self {
            layout,
            aisle_xs,
            shelves,
        })
    }

    /// Builder for the default store layout
    pub fn with_defaults() -> Result<Self, LayoutError> {
        Self::new(StoreLayout::default())
    }

    /// The layout in use
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Number of products the store can hold
    pub fn capacity(&self) -> usize {
        self.shelves.len()
    }

    /// Shelf cells in placement order: aisle by aisle, top to bottom,
    /// left shelf then right shelf. A shelf shared by two adjacent aisles
    /// is listed once.
    fn shelf_order(layout: &StoreLayout, aisle_xs: &[i32]) -> Vec<GridCoord> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for &ax in aisle_xs {
            for y in 1..layout.height - 1 {
                for x in [ax - 1, ax + layout.aisle_width] {
                    let coord = GridCoord::new(x, y);
                    if layout.classify(coord, aisle_xs) == CellKind::Product && seen.insert(coord)
                    {
                        order.push(coord);
                    }
                }
            }
        }
        order
    }

    /// Lay out the store and place `products` on shelves in order.
    ///
    /// Every placed product's `location` is overwritten with its shelf
    /// cell. Fails without touching `products` if they do not all fit.
    pub fn build(&self, products: &mut [Product]) -> Result<Grid, LayoutError> {
        if products.len() > self.shelves.len() {
            return Err(LayoutError::CapacityExceeded {
                requested: products.len(),
                available: self.shelves.len(),
            });
        }

        let mut grid = Grid::filled(self.layout.width, self.layout.height, CellKind::Empty);
        for cell in grid.cells_mut() {
            cell.kind = self.layout.classify(cell.coord, &self.aisle_xs);
        }

        for (product, &shelf) in products.iter_mut().zip(&self.shelves) {
            product.location = Some(shelf);
            if let Some(cell) = grid.get_mut(shelf) {
                cell.product = Some(product.clone());
                cell.annotations.in_shopping_list = true;
            }
        }

        info!(
            "[GridMapBuilder] placed {} of {} shelf cells",
            products.len(),
            self.shelves.len()
        );
        Ok(grid)
    }

    /// Build for a shopping list, writing shelf placements back into it
    pub fn build_for(&self, list: &mut ShoppingList) -> Result<Grid, LayoutError> {
        let mut products: Vec<Product> = list.products().cloned().collect();
        let grid = self.build(&mut products)?;
        for (item, placed) in list.items_mut().iter_mut().zip(products) {
            item.product.location = placed.location;
        }
        Ok(grid)
    }
}
