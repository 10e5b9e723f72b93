//! Point and coordinate types for the store grid.
//!
//! Grid rows grow downward: `y + 1` is one cell "down" (towards the
//! entrance), `x + 1` is one cell "right".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True if `other` differs by exactly one unit on exactly one axis
    #[inline]
    pub fn is_adjacent(&self, other: &GridCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Get the 4 cardinal neighbors (right, left, down, up).
    ///
    /// The order is fixed; A* discovery order and therefore route output
    /// depend on it.
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.x + 1, self.y), // Right
            GridCoord::new(self.x - 1, self.y), // Left
            GridCoord::new(self.x, self.y + 1), // Down
            GridCoord::new(self.x, self.y - 1), // Up
        ]
    }

    /// Cell center in continuous coordinates
    #[inline]
    pub fn to_world(self) -> WorldPoint {
        WorldPoint::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Continuous (sub-cell) position, in grid units
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in cells
    pub x: f32,
    /// Y coordinate in cells
    pub y: f32,
}

impl WorldPoint {
    /// Create a new point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle from this point to another (radians, atan2(dy, dx))
    #[inline]
    pub fn angle_to(&self, other: &WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dy.atan2(dx)
    }

    /// Create a point at a given angle and distance from this point
    #[inline]
    pub fn point_at(&self, angle: f32, distance: f32) -> WorldPoint {
        WorldPoint::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Nearest grid cell
    #[inline]
    pub fn to_grid(self) -> GridCoord {
        GridCoord::new(self.x.round() as i32, self.y.round() as i32)
    }
}
