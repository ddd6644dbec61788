// src/lib.rs
//! # rpg_mapper
//!
//! Grid maps for tabletop campaigns: a layered map model, procedural
//! generators for dungeons, roads and towns, an A* grid pathfinder, and the
//! token interaction engine behind an editing session.

pub mod document;
pub mod editor;
pub mod error;
pub mod generator;
pub mod map;
pub mod pathfinding;
pub mod roster;
pub mod utils;

pub use error::{MapError, Result};
pub use generator::{generate, generate_seeded, GenerationRequest, GeneratorKind};
pub use map::{LevelMap, MapType, Token, TokenKind};
