//! Arrival detection at shopping-list products.

use std::collections::HashSet;

use crate::core::{GridCoord, Product, ShoppingList};

/// A shopping-list product reached for the first time
#[derive(Clone, Debug, PartialEq)]
pub struct ArrivalEvent {
    /// The product
    pub product: Product,
    /// Step index at which it was reached
    pub step: usize,
    /// Shelf cell
    pub coord: GridCoord,
}

/// Tracks which shopping-list products have been visited
#[derive(Clone, Debug, Default)]
pub struct ArrivalTracker {
    visited: HashSet<String>,
}

impl ArrivalTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the product at `coord` visited.
    ///
    /// Fires once per product; re-arriving returns `None`.
    pub fn check(&mut self, coord: GridCoord, step: usize, shopping: &ShoppingList) -> Option<ArrivalEvent> {
        let item = shopping.item_at(coord)?;
        if !self.visited.insert(item.product.id.clone()) {
            return None;
        }
        Some(ArrivalEvent {
            product: item.product.clone(),
            step,
            coord,
        })
    }

    /// Visited product ids
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Has a product been visited?
    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    /// Has every product on the list been visited?
    pub fn all_collected(&self, shopping: &ShoppingList) -> bool {
        !shopping.is_empty() && shopping.products().all(|p| self.visited.contains(&p.id))
    }

    /// Forget all visits
    pub fn clear(&mut self) {
        self.visited.clear();
    }
}
