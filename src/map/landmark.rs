// src/map/landmark.rs
use crate::utils::Cell;

/// A named point of interest, rendered as a text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landmark {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

impl Landmark {
    pub fn new(cell: Cell, text: impl Into<String>) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            text: text.into(),
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}
