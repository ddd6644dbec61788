// src/map/level_map.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::map::terrain::palette;
use crate::map::{Landmark, TerrainRect, Token};
use crate::utils::{Cell, GridRect};

/// Pixels per cell used when a map carries no presentation hint.
pub const DEFAULT_GRID_SIZE: u32 = 20;

/// Whether a map depicts open terrain or the interior of a structure.
/// Outside maps conventionally only use level 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    Outside,
    Inside,
}

/// One floor of a map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub(crate) elements: Vec<TerrainRect>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) landmarks: Vec<Landmark>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terrain elements in draw order.
    pub fn elements(&self) -> &[TerrainRect] {
        &self.elements
    }

    /// Tokens in insertion order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn token(&self, name: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.name == name)
    }

    pub fn landmark(&self, text: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.text == text)
    }
}

/// The grid map: map-wide metadata plus one [`Level`] per floor.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMap {
    pub name: String,
    width: i32,
    height: i32,
    /// Pixels per cell. Carried for renderers; the core never reads it.
    pub grid_size: u32,
    grid_scale: f64,
    pub map_type: MapType,
    levels: BTreeMap<i32, Level>,
}

impl LevelMap {
    /// Creates a map with an empty level 0.
    pub fn new(
        name: impl Into<String>,
        width: i32,
        height: i32,
        grid_scale: f64,
        map_type: MapType,
    ) -> Result<Self> {
        validate_dimensions(width, height, grid_scale)?;
        let mut levels = BTreeMap::new();
        levels.insert(0, Level::new());
        Ok(Self {
            name: name.into(),
            width,
            height,
            grid_size: DEFAULT_GRID_SIZE,
            grid_scale,
            map_type,
            levels,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn grid_scale(&self) -> f64 {
        self.grid_scale
    }

    pub fn set_grid_scale(&mut self, grid_scale: f64) -> Result<()> {
        validate_dimensions(self.width, self.height, grid_scale)?;
        self.grid_scale = grid_scale;
        Ok(())
    }

    /// The full map rectangle.
    pub fn bounds(&self) -> GridRect {
        GridRect::new(0, 0, self.width, self.height)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.bounds().contains(cell)
    }

    pub fn level(&self, index: i32) -> Option<&Level> {
        self.levels.get(&index)
    }

    /// Returns the level, creating it empty on first reference.
    pub fn level_mut(&mut self, index: i32) -> &mut Level {
        self.levels.entry(index).or_default()
    }

    /// Returns the level only if it already exists.
    pub(crate) fn level_mut_existing(&mut self, index: i32) -> Option<&mut Level> {
        self.levels.get_mut(&index)
    }

    pub fn levels(&self) -> impl Iterator<Item = (i32, &Level)> {
        self.levels.iter().map(|(index, level)| (*index, level))
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Appends a terrain element on top of the level's existing elements.
    pub fn add_element(&mut self, level: i32, element: TerrainRect) {
        self.level_mut(level).elements.push(element);
    }

    pub fn add_landmark(&mut self, level: i32, landmark: Landmark) {
        self.level_mut(level).landmarks.push(landmark);
    }

    /// Paints a full-bounds rectangle in the given color.
    pub fn paint_background(&mut self, level: i32, color: &str) {
        let bounds = self.bounds();
        self.add_element(level, TerrainRect::from_rect(bounds, color));
    }

    /// Resets a level to a single background rectangle covering the map.
    pub fn clear_level(&mut self, level: i32) {
        let level_ref = self.level_mut(level);
        level_ref.elements.clear();
        level_ref.tokens.clear();
        level_ref.landmarks.clear();
        self.paint_background(level, palette::BACKGROUND);
    }

    /// Replaces a level wholesale. Used to restore state on undo.
    pub(crate) fn restore_level(&mut self, index: i32, level: Level) {
        self.levels.insert(index, level);
    }

    /// Drops a level entirely. Level 0 is only emptied, never removed.
    pub(crate) fn remove_level(&mut self, index: i32) {
        if index == 0 {
            self.levels.insert(0, Level::new());
        } else {
            self.levels.remove(&index);
        }
    }

    /// Finds a token by name on any level.
    pub fn find_token(&self, name: &str) -> Option<(i32, &Token)> {
        self.levels
            .iter()
            .find_map(|(index, level)| level.token(name).map(|token| (*index, token)))
    }

    /// Every token on the map, paired with its level.
    pub fn all_tokens(&self) -> impl Iterator<Item = (i32, &Token)> {
        self.levels
            .iter()
            .flat_map(|(index, level)| level.tokens.iter().map(move |t| (*index, t)))
    }
}

pub(crate) fn validate_dimensions(width: i32, height: i32, grid_scale: f64) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(MapError::InvalidSettings(format!(
            "map dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    if !(grid_scale > 0.0) || !grid_scale.is_finite() {
        return Err(MapError::InvalidSettings(format!(
            "grid scale must be a positive number, got {}",
            grid_scale
        )));
    }
    Ok(())
}
