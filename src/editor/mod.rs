// src/editor/mod.rs

pub mod commands;
mod spatial;
pub mod tools;

pub use commands::{Command, CommandType};
pub use spatial::{calculate_distance, cell_center_pixels, clamp_drag, MoveLimit, HIT_RADIUS};

use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;
use rand::Rng;

use crate::error::{MapError, Result};
use crate::generator::{self, GenerationRequest, GeneratorKind, MapSettings};
use crate::map::LevelMap;
use crate::utils::Point2D;
use tools::{GridSettings, PaintMode, PaintTool, PointerEvent, TokenTool, Tool, ToolAction};

// --- Enums and Supporting Types ---

/// The editing tools available in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Brush,
    Rect,
    Tokens,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Rect => "Rectangle",
            ToolKind::Tokens => "Tokens",
        }
    }

    pub fn all() -> &'static [ToolKind] {
        &[ToolKind::Brush, ToolKind::Rect, ToolKind::Tokens]
    }
}

// --- Main Editor Struct ---

/// One editing session over a single map.
pub struct Editor {
    /// The map being edited. Readers such as a renderer hold a clone of the
    /// `Arc`; only the editor writes.
    map: Arc<RwLock<LevelMap>>,

    current_tool: ToolKind,
    paint_tool: PaintTool,
    token_tool: TokenTool,
    grid_settings: GridSettings,
    current_level: i32,

    undo_stack: Vec<CommandType>,
    redo_stack: Vec<CommandType>,

    /// Undo depth at the last save; `None` when the saved state is no longer
    /// reachable through undo/redo.
    saved_depth: Option<usize>,
    status: Option<String>,
}

impl Editor {
    /// Starts a session on an existing map, treated as saved.
    pub fn new(map: LevelMap) -> Self {
        let grid_settings = GridSettings {
            size: map.grid_size,
            ..GridSettings::default()
        };
        Self {
            map: Arc::new(RwLock::new(map)),
            current_tool: ToolKind::Tokens,
            paint_tool: PaintTool::new(grid_settings.clone()),
            token_tool: TokenTool::new(grid_settings.clone()),
            grid_settings,
            current_level: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            saved_depth: Some(0),
            status: None,
        }
    }

    /// Shared handle to the map.
    pub fn map(&self) -> Arc<RwLock<LevelMap>> {
        Arc::clone(&self.map)
    }

    /// Replaces the map with a blank one of the given size and scale.
    pub fn new_blank(&mut self, settings: &MapSettings) -> Result<()> {
        let request = GenerationRequest::new(GeneratorKind::Blank, settings.clone());
        let map = generator::generate(&request, &mut rand::rng())?;
        self.replace_map(map);
        Ok(())
    }

    /// Generates a map and installs it. Nothing changes if the request is
    /// rejected.
    pub fn generate(&mut self, request: &GenerationRequest, rng: &mut impl Rng) -> Result<()> {
        let map = generator::generate(request, rng)?;
        self.replace_map(map);
        Ok(())
    }

    /// Installs a new map, dropping history and selection.
    pub fn replace_map(&mut self, map: LevelMap) {
        info!("Editing '{}' ({}x{})", map.name, map.width(), map.height());
        self.grid_settings.size = map.grid_size;
        self.apply_grid_settings();
        *self.map.write() = map;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.paint_tool.cleanup();
        self.token_tool.cleanup();
        self.current_level = 0;
        self.saved_depth = None;
        self.status = None;
    }

    /// Whether replacing the map would discard painted terrain: level 0 holds
    /// more than its background.
    pub fn needs_confirmation(&self) -> bool {
        self.map
            .read()
            .level(0)
            .map_or(false, |level| level.elements().len() > 1)
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Switches tools. Leaving the token tool clears the token selection.
    pub fn set_current_tool(&mut self, tool: ToolKind) {
        match tool {
            ToolKind::Brush => self.paint_tool.set_mode(PaintMode::Brush),
            ToolKind::Rect => self.paint_tool.set_mode(PaintMode::Rect),
            ToolKind::Tokens => {}
        }
        if tool != ToolKind::Tokens {
            self.token_tool.cleanup();
        }
        self.current_tool = tool;
    }

    pub fn paint_tool_mut(&mut self) -> &mut PaintTool {
        &mut self.paint_tool
    }

    pub fn token_tool(&self) -> &TokenTool {
        &self.token_tool
    }

    pub fn token_tool_mut(&mut self) -> &mut TokenTool {
        &mut self.token_tool
    }

    pub fn grid_settings(&self) -> &GridSettings {
        &self.grid_settings
    }

    /// Sets the real-world distance a token may be dragged; 0 disables.
    pub fn set_max_move_distance(&mut self, distance: f64) {
        self.grid_settings.max_move_distance = distance.max(0.0);
        self.apply_grid_settings();
    }

    pub fn current_level(&self) -> i32 {
        self.current_level
    }

    pub fn set_current_level(&mut self, level: i32) {
        self.current_level = level;
        self.token_tool.cleanup();
    }

    // --- Pointer input ---

    pub fn press(&mut self, pos: Point2D, ctrl: bool) {
        let event = self.event(pos, ctrl);
        let shared = Arc::clone(&self.map);
        let action = self.active_tool_mut().on_press(&shared.read(), event);
        self.apply_action(action);
    }

    pub fn drag(&mut self, pos: Point2D) {
        let event = self.event(pos, false);
        let shared = Arc::clone(&self.map);
        let action = self.active_tool_mut().on_drag(&shared.read(), event);
        self.apply_action(action);
    }

    pub fn release(&mut self, pos: Point2D) {
        let event = self.event(pos, false);
        let shared = Arc::clone(&self.map);
        let action = self.active_tool_mut().on_release(&shared.read(), event);
        self.apply_action(action);
    }

    /// Deletes every selected token in one undoable step.
    pub fn delete_selected_tokens(&mut self) {
        let shared = Arc::clone(&self.map);
        let action = self.token_tool.delete_selected(&shared.read());
        self.apply_action(action);
    }

    /// Distance readout for the current token selection.
    pub fn selection_distance(&self) -> String {
        self.token_tool.selection_distance(&self.map.read())
    }

    // --- History ---

    pub fn execute_command(&mut self, mut command: CommandType) -> Result<()> {
        if let Err(err) = command.execute(&mut self.map.write()) {
            warn!("Could not {}: {}", command.describe(), err);
            self.status = Some(err.to_string());
            return Err(err);
        }
        if self.saved_depth.map_or(false, |depth| depth > self.undo_stack.len()) {
            self.saved_depth = None;
        }
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<()> {
        let mut command = self.undo_stack.pop().ok_or(MapError::NothingToUndo)?;
        if let Err(err) = command.unexecute(&mut self.map.write()) {
            warn!("Could not undo {}: {}", command.describe(), err);
            self.undo_stack.push(command);
            return Err(err);
        }
        info!("Undid {}", command.describe());
        self.redo_stack.push(command);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        let mut command = self.redo_stack.pop().ok_or(MapError::NothingToRedo)?;
        if let Err(err) = command.execute(&mut self.map.write()) {
            warn!("Could not redo {}: {}", command.describe(), err);
            self.redo_stack.push(command);
            return Err(err);
        }
        info!("Redid {}", command.describe());
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.saved_depth != Some(self.undo_stack.len())
    }

    /// Called once the map has been persisted.
    pub fn mark_saved(&mut self) {
        self.saved_depth = Some(self.undo_stack.len());
    }

    /// The last warning or notice for the user, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn event(&self, pos: Point2D, ctrl: bool) -> PointerEvent {
        PointerEvent {
            position: pos,
            ctrl,
            level: self.current_level,
        }
    }

    fn active_tool_mut(&mut self) -> &mut dyn Tool {
        match self.current_tool {
            ToolKind::Brush | ToolKind::Rect => &mut self.paint_tool,
            ToolKind::Tokens => &mut self.token_tool,
        }
    }

    fn apply_grid_settings(&mut self) {
        self.paint_tool.set_grid_settings(self.grid_settings.clone());
        self.token_tool.set_grid_settings(self.grid_settings.clone());
    }

    fn apply_action(&mut self, action: ToolAction) {
        if let Some(status) = action.status {
            self.status = Some(status);
        }
        for command in action.commands {
            // Failures are reported through the status message.
            let _ = self.execute_command(command);
        }
    }
}
