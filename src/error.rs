// src/error.rs

use thiserror::Error;

/// Errors raised by map editing, generation and schema conversion.
#[derive(Debug, Error)]
pub enum MapError {
    /// Generation or map settings that cannot produce a valid map.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A token with this name is already placed somewhere on the map.
    #[error("token '{0}' is already on the map")]
    DuplicateToken(String),

    #[error("token '{0}' not found")]
    TokenNotFound(String),

    #[error("level {0} does not exist")]
    LevelNotFound(i32),

    /// The persisted document could not be encoded or decoded.
    #[error("map schema error: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, MapError>;
