// src/editor/spatial.rs
//! Token placement, hit-testing, distance and movement-range clamping.

use log::{info, warn};

use crate::error::{MapError, Result};
use crate::map::{LevelMap, Token, TokenKind};
use crate::utils::{Cell, Point2D};

/// Radius, in cells, within which a query point hits a token's center.
pub const HIT_RADIUS: f64 = 0.5;

impl LevelMap {
    /// Places a new token. Fails without touching the map when the name is
    /// already used on any level.
    pub fn add_token(
        &mut self,
        name: &str,
        kind: TokenKind,
        x: i32,
        y: i32,
        level: i32,
    ) -> Result<()> {
        if let Some((existing_level, _)) = self.find_token(name) {
            warn!(
                "Token '{}' already placed on level {}",
                name, existing_level
            );
            return Err(MapError::DuplicateToken(name.to_string()));
        }
        self.level_mut(level)
            .tokens
            .push(Token::new(name, kind, x, y));
        info!("Placed {} token '{}' at ({}, {}) on level {}", kind, name, x, y, level);
        Ok(())
    }

    /// Moves a token on the given level. The target cell is not checked
    /// against the map bounds.
    pub fn move_token(&mut self, name: &str, x: i32, y: i32, level: i32) -> Result<()> {
        let token = self
            .token_mut(name, level)
            .ok_or_else(|| MapError::TokenNotFound(name.to_string()))?;
        token.x = x;
        token.y = y;
        Ok(())
    }

    /// Removes a token from the given level, returning it.
    pub fn delete_token(&mut self, name: &str, level: i32) -> Result<Token> {
        let level_ref = self
            .level_mut_existing(level)
            .ok_or(MapError::LevelNotFound(level))?;
        let index = level_ref
            .tokens
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| MapError::TokenNotFound(name.to_string()))?;
        Ok(level_ref.tokens.remove(index))
    }

    /// Returns the most recently placed token whose center lies within
    /// [`HIT_RADIUS`] of `(x, y)`, in cell units.
    pub fn get_token_at(&self, x: f64, y: f64, level: i32) -> Option<&Token> {
        let query = Point2D::new(x, y);
        self.level(level)?
            .tokens()
            .iter()
            .rev()
            .find(|token| token.center().distance_to(&query) <= HIT_RADIUS)
    }

    /// Hit-tests at the center of a grid cell.
    pub fn get_token_in_cell(&self, cell: Cell, level: i32) -> Option<&Token> {
        let center = cell.center();
        self.get_token_at(center.x, center.y, level)
    }

    /// Euclidean distance between two named tokens, in real-world units.
    pub fn distance_between(&self, a: &str, b: &str) -> Result<f64> {
        let (_, first) = self
            .find_token(a)
            .ok_or_else(|| MapError::TokenNotFound(a.to_string()))?;
        let (_, second) = self
            .find_token(b)
            .ok_or_else(|| MapError::TokenNotFound(b.to_string()))?;
        Ok(calculate_distance(first, second) * self.grid_scale())
    }

    fn token_mut(&mut self, name: &str, level: i32) -> Option<&mut Token> {
        self.level_mut_existing(level)?
            .tokens
            .iter_mut()
            .find(|t| t.name == name)
    }
}

/// Euclidean distance between two tokens, in cells.
pub fn calculate_distance(a: &Token, b: &Token) -> f64 {
    a.center().distance_to(&b.center())
}

/// Pixel position of a cell's center.
pub fn cell_center_pixels(cell: Cell, cell_pixels: f64) -> Point2D {
    Point2D::new(
        (cell.x as f64 + 0.5) * cell_pixels,
        (cell.y as f64 + 0.5) * cell_pixels,
    )
}

/// Movement limit for a token drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveLimit {
    /// Maximum movement in real-world units; zero or less disables the limit.
    pub max_distance: f64,
    /// Real-world distance per cell.
    pub grid_scale: f64,
    /// Pixels per cell on the canvas.
    pub cell_pixels: f64,
}

impl MoveLimit {
    /// Maximum drag radius in pixels, or `None` when unlimited.
    pub fn max_pixels(&self) -> Option<f64> {
        if self.max_distance > 0.0 && self.grid_scale > 0.0 {
            Some(self.max_distance / self.grid_scale * self.cell_pixels)
        } else {
            None
        }
    }
}

/// Preview position for a token dragged from `start` toward `pointer`.
///
/// Past the movement limit the preview sits on the limit circle along the ray
/// from the start cell's center to the pointer.
pub fn clamp_drag(start: Cell, pointer: Point2D, limit: &MoveLimit) -> Point2D {
    let Some(max_pixels) = limit.max_pixels() else {
        return pointer;
    };
    let origin = cell_center_pixels(start, limit.cell_pixels);
    let moved = origin.distance_to(&pointer);
    if moved <= max_pixels || moved == 0.0 {
        return pointer;
    }
    let angle = (pointer.y - origin.y).atan2(pointer.x - origin.x);
    Point2D::new(
        origin.x + max_pixels * angle.cos(),
        origin.y + max_pixels * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapType;
    use assert_approx_eq::assert_approx_eq;

    fn test_map() -> LevelMap {
        LevelMap::new("Tokens", 40, 40, 1.5, MapType::Inside).unwrap()
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut map = test_map();
        map.add_token("Hero", TokenKind::Pc, 5, 5, 0).unwrap();
        let result = map.add_token("Hero", TokenKind::Npc, 1, 1, 0);

        assert!(matches!(result, Err(MapError::DuplicateToken(_))));
        let heroes: Vec<_> = map.all_tokens().filter(|(_, t)| t.name == "Hero").collect();
        assert_eq!(heroes.len(), 1);
        assert_eq!((heroes[0].1.x, heroes[0].1.y), (5, 5));
        assert_eq!(heroes[0].1.kind, TokenKind::Pc);
    }

    #[test]
    fn test_duplicate_name_rejected_across_levels() {
        let mut map = test_map();
        map.add_token("Hero", TokenKind::Pc, 5, 5, 0).unwrap();
        assert!(map.add_token("Hero", TokenKind::Pc, 5, 5, 3).is_err());
        assert!(map.level(3).is_none());
    }

    #[test]
    fn test_hit_testing_radius() {
        let mut map = test_map();
        map.add_token("Goblin", TokenKind::Npc, 10, 10, 0).unwrap();
        assert_eq!(map.get_token_at(10.4, 10.4, 0).unwrap().name, "Goblin");
        assert!(map.get_token_at(11.0, 11.0, 0).is_none());
        assert!(map.get_token_at(10.4, 10.4, 1).is_none());
    }

    #[test]
    fn test_hit_prefers_latest_token() {
        let mut map = test_map();
        map.add_token("First", TokenKind::Npc, 4, 4, 0).unwrap();
        map.add_token("Second", TokenKind::Npc, 4, 4, 0).unwrap();
        assert_eq!(map.get_token_in_cell(Cell::new(4, 4), 0).unwrap().name, "Second");
    }

    #[test]
    fn test_move_and_delete() {
        let mut map = test_map();
        map.add_token("Rogue", TokenKind::Pc, 1, 1, 0).unwrap();
        map.move_token("Rogue", 60, -3, 0).unwrap();
        assert_eq!(map.find_token("Rogue").unwrap().1.cell(), Cell::new(60, -3));

        assert!(matches!(map.move_token("Nobody", 0, 0, 0), Err(MapError::TokenNotFound(_))));
        let removed = map.delete_token("Rogue", 0).unwrap();
        assert_eq!(removed.name, "Rogue");
        assert!(map.find_token("Rogue").is_none());
        assert!(map.delete_token("Rogue", 0).is_err());
        assert!(matches!(map.delete_token("Rogue", 9), Err(MapError::LevelNotFound(9))));
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Token::new("A", TokenKind::Pc, 2, 3);
        let b = Token::new("B", TokenKind::Npc, 7, 15);
        assert_approx_eq!(calculate_distance(&a, &b), 13.0);
        assert_eq!(calculate_distance(&a, &b), calculate_distance(&b, &a));
    }

    #[test]
    fn test_distance_in_world_units() {
        let mut map = test_map();
        map.add_token("A", TokenKind::Pc, 0, 0, 0).unwrap();
        map.add_token("B", TokenKind::Pc, 3, 4, 1).unwrap();
        assert_approx_eq!(map.distance_between("A", "B").unwrap(), 7.5);
    }

    fn limit(max_distance: f64) -> MoveLimit {
        MoveLimit {
            max_distance,
            grid_scale: 1.5,
            cell_pixels: 20.0,
        }
    }

    #[test]
    fn test_clamp_within_range_is_identity() {
        let start = Cell::new(5, 5);
        let pointer = Point2D::new(140.0, 110.0);
        assert_eq!(clamp_drag(start, pointer, &limit(9.0)), pointer);
    }

    #[test]
    fn test_clamp_disabled_with_zero_distance() {
        let pointer = Point2D::new(1000.0, -400.0);
        assert_eq!(clamp_drag(Cell::new(0, 0), pointer, &limit(0.0)), pointer);
    }

    #[test]
    fn test_clamp_projects_onto_radius() {
        let start = Cell::new(5, 5);
        let origin = cell_center_pixels(start, 20.0);
        let limit = limit(6.0);
        let max_pixels = limit.max_pixels().unwrap();
        assert_approx_eq!(max_pixels, 80.0);

        let pointers = [
            Point2D::new(400.0, 110.0),
            Point2D::new(-300.0, -20.0),
            Point2D::new(110.0, 900.0),
            Point2D::new(333.0, 321.0),
        ];
        for pointer in pointers {
            let preview = clamp_drag(start, pointer, &limit);
            assert!(origin.distance_to(&preview) <= max_pixels + 1e-9);
            assert_approx_eq!(origin.distance_to(&preview), max_pixels, 1e-9);
            // Direction is preserved.
            let raw = (pointer.y - origin.y).atan2(pointer.x - origin.x);
            let clamped = (preview.y - origin.y).atan2(preview.x - origin.x);
            assert_approx_eq!(raw, clamped, 1e-9);
        }
    }
}
