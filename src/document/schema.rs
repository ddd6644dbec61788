// src/document/schema.rs
//! The persisted form of a map.
//!
//! Storage itself (files, databases) is left to the caller; this module only
//! converts between [`LevelMap`] and its serde representation:
//!
//! ```json
//! {"name": "Crypt", "width": 50, "height": 50, "grid_size": 20, "grid_scale": 1.5,
//!  "map_type": "inside",
//!  "levels": {"0": {"elements": [{"type": "rect", "coords": [0, 0, 50, 50], "color": "#2B2B2B"}],
//!                   "tokens": [{"name": "Hero", "type": "PC", "x": 5, "y": 5}],
//!                   "landmarks": [{"x": 7, "y": 9, "text": "Entrance"}]}}}
//! ```

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::map::{Landmark, Level, LevelMap, MapType, TerrainRect, Token, TokenKind, DEFAULT_GRID_SIZE};
use crate::utils::Cell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub name: String,
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    pub grid_scale: f64,
    #[serde(default = "default_map_type")]
    pub map_type: MapType,
    #[serde(default)]
    pub levels: BTreeMap<i32, LevelDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDocument {
    #[serde(default)]
    pub elements: Vec<ElementDocument>,
    #[serde(default)]
    pub tokens: Vec<TokenDocument>,
    #[serde(default)]
    pub landmarks: Vec<LandmarkDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementDocument {
    Rect { coords: [i32; 4], color: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkDocument {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

fn default_map_type() -> MapType {
    MapType::Outside
}

impl From<&Level> for LevelDocument {
    fn from(level: &Level) -> Self {
        Self {
            elements: level
                .elements()
                .iter()
                .map(|e| ElementDocument::Rect {
                    coords: e.coords(),
                    color: e.color().to_string(),
                })
                .collect(),
            tokens: level
                .tokens()
                .iter()
                .map(|t| TokenDocument {
                    name: t.name.clone(),
                    kind: t.kind,
                    x: t.x,
                    y: t.y,
                })
                .collect(),
            landmarks: level
                .landmarks()
                .iter()
                .map(|l| LandmarkDocument {
                    x: l.x,
                    y: l.y,
                    text: l.text.clone(),
                })
                .collect(),
        }
    }
}

impl From<LevelDocument> for Level {
    fn from(doc: LevelDocument) -> Self {
        Level {
            // `TerrainRect::new` normalizes hand-edited coordinates.
            elements: doc
                .elements
                .into_iter()
                .map(|ElementDocument::Rect { coords: [x1, y1, x2, y2], color }| {
                    TerrainRect::new(x1, y1, x2, y2, color)
                })
                .collect(),
            tokens: doc
                .tokens
                .into_iter()
                .map(|t| Token::new(t.name, t.kind, t.x, t.y))
                .collect(),
            landmarks: doc
                .landmarks
                .into_iter()
                .map(|l| Landmark::new(Cell::new(l.x, l.y), l.text))
                .collect(),
        }
    }
}

impl LevelMap {
    pub fn to_document(&self) -> MapDocument {
        MapDocument {
            name: self.name.clone(),
            width: self.width(),
            height: self.height(),
            grid_size: self.grid_size,
            grid_scale: self.grid_scale(),
            map_type: self.map_type,
            levels: self
                .levels()
                .map(|(index, level)| (index, LevelDocument::from(level)))
                .collect(),
        }
    }

    /// Rebuilds a map from its persisted form. Rejects non-positive
    /// dimensions or scale, and token names used more than once.
    pub fn from_document(doc: MapDocument) -> Result<LevelMap> {
        let mut map = LevelMap::new(doc.name, doc.width, doc.height, doc.grid_scale, doc.map_type)?;
        if doc.grid_size == 0 {
            return Err(MapError::InvalidSettings("grid size must be positive".to_string()));
        }
        map.grid_size = doc.grid_size;

        for (index, level_doc) in doc.levels {
            let level = Level::from(level_doc);
            for token in level.tokens() {
                if map.find_token(&token.name).is_some()
                    || level.tokens().iter().filter(|t| t.name == token.name).count() > 1
                {
                    return Err(MapError::DuplicateToken(token.name.clone()));
                }
            }
            debug!(
                "Loaded level {}: {} elements, {} tokens",
                index,
                level.elements().len(),
                level.tokens().len()
            );
            map.restore_level(index, level);
        }
        Ok(map)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn from_json(json: &str) -> Result<LevelMap> {
        let doc: MapDocument = serde_json::from_str(json)?;
        LevelMap::from_document(doc)
    }
}
