// src/editor/tools/mod.rs
mod paint;
mod tokens;

pub use paint::{PaintMode, PaintTool};
pub use tokens::{TokenMode, TokenTool};

use crate::editor::commands::CommandType;
use crate::editor::spatial::MoveLimit;
use crate::map::LevelMap;
use crate::utils::util::pixel_to_cell;
use crate::utils::{Cell, Point2D};

/// A pointer press, drag or release on the map canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point2D,
    pub ctrl: bool,
    pub level: i32,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, level: i32) -> Self {
        Self {
            position: Point2D::new(x, y),
            ctrl: false,
            level,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

/// What a tool wants done after handling an event. The editor applies the
/// commands through its undo stack.
#[derive(Debug, Default)]
pub struct ToolAction {
    pub commands: Vec<CommandType>,
    pub status: Option<String>,
}

impl ToolAction {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn command(command: CommandType) -> Self {
        Self {
            commands: vec![command],
            status: None,
        }
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self {
            commands: Vec::new(),
            status: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.status.is_none()
    }
}

pub trait Tool {
    fn name(&self) -> &'static str;
    fn on_press(&mut self, map: &LevelMap, event: PointerEvent) -> ToolAction;
    fn on_drag(&mut self, map: &LevelMap, event: PointerEvent) -> ToolAction;
    fn on_release(&mut self, map: &LevelMap, event: PointerEvent) -> ToolAction;
    fn cleanup(&mut self);
}

// Grid settings struct
#[derive(Debug, Clone)]
pub struct GridSettings {
    /// Pixels per cell on the canvas.
    pub size: u32,
    /// Real-world distance a token may be dragged; 0 disables the limit.
    pub max_move_distance: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 20,
            max_move_distance: 0.0,
        }
    }
}

impl GridSettings {
    /// The cell under a pixel position.
    pub fn cell_at(&self, pos: Point2D) -> Cell {
        Cell::new(pixel_to_cell(pos.x, self.size), pixel_to_cell(pos.y, self.size))
    }

    pub fn move_limit(&self, grid_scale: f64) -> MoveLimit {
        MoveLimit {
            max_distance: self.max_move_distance,
            grid_scale,
            cell_pixels: self.size as f64,
        }
    }
}
