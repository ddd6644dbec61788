// src/map/mod.rs
pub mod landmark;
pub mod level_map;
pub mod terrain;
pub mod token;

pub use landmark::Landmark;
pub use level_map::{Level, LevelMap, MapType, DEFAULT_GRID_SIZE};
pub use terrain::{palette, TerrainRect};
pub use token::{Token, TokenKind};
