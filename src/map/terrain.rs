// src/map/terrain.rs
use crate::utils::GridRect;

/// Named material colors used by the generators and paint tools.
pub mod palette {
    pub const BACKGROUND: &str = "#2B2B2B";
    pub const FLOOR: &str = "#707070";
    pub const GRASS: &str = "#4F7942";
    pub const ROAD: &str = "#A0522D";
    pub const WATER: &str = "#1E5AA8";
    pub const BRIDGE: &str = "#8B5A2B";
    pub const SQUARE: &str = "#B8A07A";
    pub const BUILDING: &str = "#5C4033";
    pub const DOOR: &str = "#D2B48C";
    pub const PATH: &str = "#C2B280";
    pub const SCENERY: &str = "#228B22";
}

/// A colored rectangle painted onto a level. Later elements paint over
/// earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainRect {
    rect: GridRect,
    color: String,
}

impl TerrainRect {
    /// Creates an element from two corners in any order.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, color: impl Into<String>) -> Self {
        Self::from_rect(GridRect::new(x1, y1, x2, y2), color)
    }

    pub fn from_rect(rect: GridRect, color: impl Into<String>) -> Self {
        Self {
            rect,
            color: color.into(),
        }
    }

    pub fn rect(&self) -> GridRect {
        self.rect
    }

    pub fn coords(&self) -> [i32; 4] {
        [self.rect.x1, self.rect.y1, self.rect.x2, self.rect.y2]
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_rect_is_normalized() {
        let element = TerrainRect::new(10, 2, 4, 8, palette::FLOOR);
        assert_eq!(element.coords(), [4, 2, 10, 8]);
        assert_eq!(element.color(), palette::FLOOR);
    }
}
