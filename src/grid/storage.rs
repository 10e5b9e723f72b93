//! Grid storage.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, CellKind, GridCoord};
use crate::error::LayoutError;

/// Rectangular store grid, row-major.
///
/// Dimensions never change after construction. Updates produce a new
/// `Grid` value; published grids are shared read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell set to `kind`
    pub fn filled(width: i32, height: i32, kind: CellKind) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(GridCoord::new(x, y), kind));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Parse a grid from rows of [`CellKind::as_char`] characters.
    ///
    /// ```
    /// use marga_nav::grid::Grid;
    /// use marga_nav::core::{CellKind, GridCoord};
    ///
    /// let grid = Grid::from_ascii(&[
    ///     "#C#",
    ///     "#=#",
    ///     "#E#",
    /// ]).unwrap();
    /// assert_eq!(grid.kind(GridCoord::new(1, 1)), Some(CellKind::Aisle));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Result<Self, LayoutError> {
        let expected = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(expected * rows.len());

        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != expected {
                return Err(LayoutError::RaggedRows { row: y, len, expected });
            }
            for (x, ch) in row.chars().enumerate() {
                let kind = CellKind::from_char(ch).ok_or(LayoutError::InvalidCellChar {
                    ch,
                    x: x as i32,
                    y: y as i32,
                })?;
                cells.push(Cell::new(GridCoord::new(x as i32, y as i32), kind));
            }
        }

        Ok(Self {
            width: expected as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    /// Render one character per cell, rows separated by newlines
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|c| c.kind.as_char()));
            out.push('\n');
        }
        out
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Is the coordinate inside the grid?
    #[inline]
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some((coord.y * self.width + coord.x) as usize)
        } else {
            None
        }
    }

    /// Cell at a coordinate
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<&Cell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, coord: GridCoord) -> Option<&mut Cell> {
        self.index(coord).map(move |i| &mut self.cells[i])
    }

    /// Kind of the cell at a coordinate
    #[inline]
    pub fn kind(&self, coord: GridCoord) -> Option<CellKind> {
        self.get(coord).map(|c| c.kind)
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// First cell of a given kind in raster order
    pub fn find_kind(&self, kind: CellKind) -> Option<GridCoord> {
        self.cells.iter().find(|c| c.kind == kind).map(|c| c.coord)
    }

    /// Entrance coordinate
    pub fn entrance(&self) -> Option<GridCoord> {
        self.find_kind(CellKind::Entrance)
    }

    /// Checkout coordinate
    pub fn checkout(&self) -> Option<GridCoord> {
        self.find_kind(CellKind::Checkout)
    }

    /// Shelf cell currently holding a product id
    pub fn product_location(&self, id: &str) -> Option<GridCoord> {
        self.cells
            .iter()
            .find(|c| c.product.as_ref().is_some_and(|p| p.id == id))
            .map(|c| c.coord)
    }
}
