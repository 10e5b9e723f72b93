//! Store grid: layout, storage, product placement and navigation annotations.
//!
//! - [`StoreLayout`]: validated store geometry
//! - [`GridMapBuilder`]: lays out the grid and places products on shelves
//! - [`Grid`]: the cell array, with ASCII rendering for debugging

mod annotate;
mod builder;
mod layout;
mod storage;

pub use builder::GridMapBuilder;
pub use layout::StoreLayout;
pub use storage::Grid;
