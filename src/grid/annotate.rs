//! Dynamic navigation annotations.
//!
//! Annotations are never patched. Every route or step change produces a
//! fresh grid with every flag recomputed from the inputs.

use std::collections::HashSet;

use crate::core::{CellAnnotations, ShoppingList};
use crate::pathfinding::Route;

use super::storage::Grid;

impl Grid {
    /// Copy of this grid annotated for a route at step `cursor`.
    ///
    /// - `on_path` and `path_direction` cover every route step
    /// - `is_current` marks the step at `cursor`
    /// - `in_shopping_list` marks cells whose product is listed
    /// - `reached` marks cells whose product id is in `visited`
    pub fn with_navigation(
        &self,
        route: &Route,
        cursor: usize,
        shopping: &ShoppingList,
        visited: &HashSet<String>,
    ) -> Grid {
        let mut grid = self.clone();

        for cell in grid.cells_mut() {
            let product = cell.product.as_ref();
            cell.annotations = CellAnnotations {
                in_shopping_list: product.is_some_and(|p| shopping.contains(&p.id)),
                reached: product.is_some_and(|p| visited.contains(&p.id)),
                ..Default::default()
            };
        }

        for (i, step) in route.steps().iter().enumerate() {
            if let Some(cell) = grid.get_mut(step.coord) {
                cell.annotations.on_path = true;
                cell.annotations.path_direction = route.path_direction(i);
            }
        }

        if let Some(step) = route.get(cursor) {
            if let Some(cell) = grid.get_mut(step.coord) {
                cell.annotations.is_current = true;
            }
        }

        grid
    }

    /// Copy with all annotations cleared except shopping-list membership
    pub fn without_navigation(&self, shopping: &ShoppingList) -> Grid {
        self.with_navigation(&Route::default(), 0, shopping, &HashSet::new())
    }
}
