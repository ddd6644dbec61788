// src/utils/geometry.rs
use serde::{Deserialize, Serialize};

/// A point in continuous space: pixels on the canvas, or fractional cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One grid cell, addressed by integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: &Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours, in a fixed order.
    pub fn neighbours(&self) -> [Cell; 4] {
        [
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x, self.y + 1),
            Cell::new(self.x, self.y - 1),
        ]
    }

    /// Center of the cell in fractional cell units.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.x as f64 + 0.5, self.y as f64 + 0.5)
    }
}

/// A half-open rectangle of cells: `x1..x2` by `y1..y2`.
///
/// Always normalized: `x1 < x2` and `y1 < y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl GridRect {
    /// Builds a rectangle from two corners in any order. A zero extent on an
    /// axis is widened to one cell.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x1, x2) = (x1.min(x2), x1.max(x2));
        let (y1, y2) = (y1.min(y2), y1.max(y2));
        Self {
            x1,
            y1,
            x2: x2.max(x1 + 1),
            y2: y2.max(y1 + 1),
        }
    }

    pub fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// The rectangle covering exactly one cell.
    pub fn cell(cell: Cell) -> Self {
        Self::new(cell.x, cell.y, cell.x + 1, cell.y + 1)
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x1 && cell.x < self.x2 && cell.y >= self.y1 && cell.y < self.y2
    }

    pub fn intersects(&self, other: &GridRect) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }

    /// Grows the rectangle by `by` cells on every side.
    pub fn expanded(&self, by: i32) -> GridRect {
        GridRect {
            x1: self.x1 - by,
            y1: self.y1 - by,
            x2: self.x2 + by,
            y2: self.y2 + by,
        }
    }

    pub fn is_within(&self, width: i32, height: i32) -> bool {
        self.x1 >= 0 && self.y1 >= 0 && self.x2 <= width && self.y2 <= height
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.y1..self.y2).flat_map(move |y| (self.x1..self.x2).map(move |x| Cell::new(x, y)))
    }
}
