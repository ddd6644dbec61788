// src/editor/tools/tokens.rs

use log::{debug, warn};

use super::{GridSettings, PointerEvent, Tool, ToolAction};
use crate::editor::commands::CommandType;
use crate::editor::spatial::{calculate_distance, clamp_drag};
use crate::map::LevelMap;
use crate::roster::RosterEntry;
use crate::utils::{Cell, Point2D};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMode {
    Select,
    /// The next press places this entry, then the tool returns to `Select`.
    Place(RosterEntry),
}

#[derive(Debug, Clone)]
struct Drag {
    name: String,
    start: Cell,
}

pub struct TokenTool {
    grid_settings: GridSettings,
    mode: TokenMode,
    selected: Vec<String>,
    dragging: Option<Drag>,
    preview: Option<Point2D>,
}

impl Default for TokenTool {
    fn default() -> Self {
        Self {
            grid_settings: GridSettings::default(),
            mode: TokenMode::Select,
            selected: Vec::new(),
            dragging: None,
            preview: None,
        }
    }
}

impl TokenTool {
    pub fn new(grid_settings: GridSettings) -> Self {
        Self {
            grid_settings,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> &TokenMode {
        &self.mode
    }

    pub fn set_placing(&mut self, entry: RosterEntry) {
        self.mode = TokenMode::Place(entry);
    }

    pub fn set_grid_settings(&mut self, grid_settings: GridSettings) {
        self.grid_settings = grid_settings;
    }

    /// Names of the selected tokens, in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Where the dragged token would be drawn, in pixels.
    pub fn preview(&self) -> Option<Point2D> {
        self.preview
    }

    /// Real-world distance between the two selected tokens, or `"-"` unless
    /// exactly two are selected.
    pub fn selection_distance(&self, map: &LevelMap) -> String {
        let [a, b] = self.selected.as_slice() else {
            return "-".to_string();
        };
        match (map.find_token(a), map.find_token(b)) {
            (Some((_, first)), Some((_, second))) => {
                format!("{:.1} m", calculate_distance(first, second) * map.grid_scale())
            }
            _ => "-".to_string(),
        }
    }

    /// Deletes every selected token as one undoable batch.
    pub fn delete_selected(&mut self, map: &LevelMap) -> ToolAction {
        if self.selected.is_empty() {
            return ToolAction::status("No tokens selected to delete.");
        }
        let commands: Vec<CommandType> = self
            .selected
            .drain(..)
            .filter_map(|name| {
                let (level, _) = map.find_token(&name)?;
                Some(CommandType::DeleteToken {
                    name,
                    level,
                    removed: None,
                })
            })
            .collect();
        if commands.is_empty() {
            return ToolAction::status("Selected tokens are no longer on the map.");
        }
        let count = commands.len();
        ToolAction {
            commands: vec![CommandType::Batch { commands }],
            status: Some(format!("Deleted {} token(s).", count)),
        }
    }

    fn place(&mut self, map: &LevelMap, entry: RosterEntry, cell: Cell, level: i32) -> ToolAction {
        self.mode = TokenMode::Select;
        if map.find_token(&entry.name).is_some() {
            warn!("Token '{}' is already on the map", entry.name);
            return ToolAction::status(format!("Token '{}' is already on the map.", entry.name));
        }
        ToolAction::command(CommandType::AddToken {
            name: entry.name,
            kind: entry.kind,
            x: cell.x,
            y: cell.y,
            level,
        })
    }

    fn toggle(&mut self, name: &str) {
        match self.selected.iter().position(|n| n == name) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(name.to_string()),
        }
    }
}

impl Tool for TokenTool {
    fn name(&self) -> &'static str {
        match self.mode {
            TokenMode::Select => "Select Tokens",
            TokenMode::Place(_) => "Place Token",
        }
    }

    fn on_press(&mut self, map: &LevelMap, event: PointerEvent) -> ToolAction {
        let cell = self.grid_settings.cell_at(event.position);
        if let TokenMode::Place(entry) = self.mode.clone() {
            return self.place(map, entry, cell, event.level);
        }

        let hit = map.get_token_in_cell(cell, event.level).map(|t| t.name.clone());
        if event.ctrl {
            if let Some(name) = hit {
                self.toggle(&name);
            }
            return ToolAction::none();
        }

        match hit {
            Some(name) => {
                if !self.selected.contains(&name) {
                    self.selected = vec![name.clone()];
                }
                debug!("Dragging '{}' from {:?}", name, cell);
                self.dragging = Some(Drag { name, start: cell });
            }
            None => self.selected.clear(),
        }
        ToolAction::none()
    }

    fn on_drag(&mut self, map: &LevelMap, event: PointerEvent) -> ToolAction {
        if let Some(drag) = &self.dragging {
            let limit = self.grid_settings.move_limit(map.grid_scale());
            self.preview = Some(clamp_drag(drag.start, event.position, &limit));
        }
        ToolAction::none()
    }

    fn on_release(&mut self, map: &LevelMap, event: PointerEvent) -> ToolAction {
        let drag = self.dragging.take();
        let preview = self.preview.take();
        let (Some(drag), Some(preview)) = (drag, preview) else {
            return ToolAction::none();
        };

        let target = self.grid_settings.cell_at(preview);
        if target == drag.start {
            return ToolAction::none();
        }
        if !map.in_bounds(target) {
            debug!("Dropped '{}' outside the map at {:?}", drag.name, target);
            return ToolAction::status("Tokens cannot be moved off the map.");
        }
        ToolAction::command(CommandType::MoveToken {
            name: drag.name,
            x: target.x,
            y: target.y,
            level: event.level,
            previous: None,
        })
    }

    fn cleanup(&mut self) {
        self.selected.clear();
        self.dragging = None;
        self.preview = None;
    }
}
