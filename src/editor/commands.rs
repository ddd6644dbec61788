// src/editor/commands.rs

use log::info;

use crate::error::{MapError, Result};
use crate::map::{Landmark, Level, LevelMap, TerrainRect, Token, TokenKind};

pub trait Command {
    fn execute(&mut self, map: &mut LevelMap) -> Result<()>;
    fn unexecute(&mut self, map: &mut LevelMap) -> Result<()>;
    fn undo(&mut self, map: &mut LevelMap) -> Result<()> {
        self.unexecute(map)
    }
}

/// Reversible edits. Fields named `previous`/`removed` are filled in by
/// `execute` so the command can be undone.
#[derive(Clone, Debug)]
pub enum CommandType {
    // Token Commands
    AddToken {
        name: String,
        kind: TokenKind,
        x: i32,
        y: i32,
        level: i32,
    },
    MoveToken {
        name: String,
        x: i32,
        y: i32,
        level: i32,
        previous: Option<(i32, i32)>,
    },
    DeleteToken {
        name: String,
        level: i32,
        removed: Option<(usize, Token)>,
    },

    // Terrain Commands
    PaintRect {
        element: TerrainRect,
        level: i32,
    },
    AddLandmark {
        landmark: Landmark,
        level: i32,
    },
    ClearLevel {
        level: i32,
        previous: Option<Level>,
    },

    // Batch Operations
    Batch { commands: Vec<CommandType> },
}

impl CommandType {
    /// Short description used in status messages.
    pub fn describe(&self) -> String {
        match self {
            CommandType::AddToken { name, .. } => format!("place '{}'", name),
            CommandType::MoveToken { name, .. } => format!("move '{}'", name),
            CommandType::DeleteToken { name, .. } => format!("delete '{}'", name),
            CommandType::PaintRect { .. } => "paint".to_string(),
            CommandType::AddLandmark { landmark, .. } => format!("label '{}'", landmark.text),
            CommandType::ClearLevel { level, .. } => format!("clear level {}", level),
            CommandType::Batch { commands } => format!("{} edits", commands.len()),
        }
    }
}

impl Command for CommandType {
    fn execute(&mut self, map: &mut LevelMap) -> Result<()> {
        match self {
            CommandType::Batch { commands } => {
                for done in 0..commands.len() {
                    if let Err(err) = commands[done].execute(map) {
                        // Roll back what already ran so a batch applies whole or not at all.
                        for applied in commands[..done].iter_mut().rev() {
                            applied.unexecute(map)?;
                        }
                        return Err(err);
                    }
                }
                Ok(())
            }
            CommandType::AddToken { name, kind, x, y, level } => {
                map.add_token(name, *kind, *x, *y, *level)
            }
            CommandType::MoveToken { name, x, y, level, previous } => {
                let token = map
                    .level(*level)
                    .and_then(|l| l.token(name.as_str()))
                    .ok_or_else(|| MapError::TokenNotFound(name.clone()))?;
                *previous = Some((token.x, token.y));
                map.move_token(name, *x, *y, *level)?;
                info!("Moved token '{}' to ({}, {})", name, x, y);
                Ok(())
            }
            CommandType::DeleteToken { name, level, removed } => {
                let index = map
                    .level(*level)
                    .and_then(|l| l.tokens().iter().position(|t| t.name == *name))
                    .ok_or_else(|| MapError::TokenNotFound(name.clone()))?;
                let token = map.delete_token(name, *level)?;
                info!("Deleted token '{}' from level {}", name, level);
                *removed = Some((index, token));
                Ok(())
            }
            CommandType::PaintRect { element, level } => {
                map.add_element(*level, element.clone());
                Ok(())
            }
            CommandType::AddLandmark { landmark, level } => {
                map.add_landmark(*level, landmark.clone());
                Ok(())
            }
            CommandType::ClearLevel { level, previous } => {
                *previous = map.level(*level).cloned();
                map.clear_level(*level);
                info!("Cleared level {}", level);
                Ok(())
            }
        }
    }

    fn unexecute(&mut self, map: &mut LevelMap) -> Result<()> {
        match self {
            CommandType::Batch { commands } => {
                for command in commands.iter_mut().rev() {
                    command.unexecute(map)?;
                }
                Ok(())
            }
            CommandType::AddToken { name, level, .. } => map.delete_token(name, *level).map(|_| ()),
            CommandType::MoveToken { name, level, previous, .. } => match previous.take() {
                Some((x, y)) => map.move_token(name, x, y, *level),
                None => Err(MapError::NothingToUndo),
            },
            CommandType::DeleteToken { level, removed, .. } => {
                let (index, token) = removed.take().ok_or(MapError::NothingToUndo)?;
                let tokens = &mut map.level_mut(*level).tokens;
                let index = index.min(tokens.len());
                tokens.insert(index, token);
                Ok(())
            }
            CommandType::PaintRect { element, level } => {
                let elements = &mut existing_level(map, *level)?.elements;
                if elements.last() != Some(&*element) {
                    return Err(MapError::NothingToUndo);
                }
                elements.pop();
                Ok(())
            }
            CommandType::AddLandmark { landmark, level } => {
                let landmarks = &mut existing_level(map, *level)?.landmarks;
                if landmarks.last() != Some(&*landmark) {
                    return Err(MapError::NothingToUndo);
                }
                landmarks.pop();
                Ok(())
            }
            CommandType::ClearLevel { level, previous } => {
                match previous.take() {
                    Some(saved) => map.restore_level(*level, saved),
                    None => map.remove_level(*level),
                }
                Ok(())
            }
        }
    }
}

fn existing_level(map: &mut LevelMap, level: i32) -> Result<&mut Level> {
    map.level_mut_existing(level)
        .ok_or(MapError::LevelNotFound(level))
}
