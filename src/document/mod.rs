// src/document/mod.rs
mod schema;

pub use self::schema::{ElementDocument, LandmarkDocument, LevelDocument, MapDocument, TokenDocument};
