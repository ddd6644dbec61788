// src/map/token.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::utils::{Cell, Point2D};

/// Whether a token stands for a player character or a non-player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "PC")]
    Pc,
    #[serde(rename = "NPC")]
    Npc,
}

impl TokenKind {
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Pc => "PC",
            TokenKind::Npc => "NPC",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TokenKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PC" => Ok(TokenKind::Pc),
            "NPC" => Ok(TokenKind::Npc),
            other => Err(MapError::InvalidSettings(format!(
                "unknown token type '{}'",
                other
            ))),
        }
    }
}

/// A placeable marker. The name is unique across every level of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub name: String,
    pub kind: TokenKind,
    pub x: i32,
    pub y: i32,
}

impl Token {
    pub fn new(name: impl Into<String>, kind: TokenKind, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            x,
            y,
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Center of the token's cell in fractional cell units.
    pub fn center(&self) -> Point2D {
        self.cell().center()
    }
}
