// src/editor/tools/paint.rs

use super::{GridSettings, PointerEvent, Tool, ToolAction};
use crate::editor::commands::CommandType;
use crate::map::{palette, LevelMap, TerrainRect};
use crate::utils::{GridRect, Point2D};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// Paints the single cell under the pointer on every drag event.
    Brush,
    /// Paints the rectangle spanned by press and release.
    Rect,
}

pub struct PaintTool {
    grid_settings: GridSettings,
    mode: PaintMode,
    color: String,
    start: Option<Point2D>,
}

impl Default for PaintTool {
    fn default() -> Self {
        Self {
            grid_settings: GridSettings::default(),
            mode: PaintMode::Brush,
            color: palette::FLOOR.to_string(),
            start: None,
        }
    }
}

impl PaintTool {
    pub fn new(grid_settings: GridSettings) -> Self {
        Self {
            grid_settings,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PaintMode) {
        self.mode = mode;
        self.start = None;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn set_grid_settings(&mut self, grid_settings: GridSettings) {
        self.grid_settings = grid_settings;
    }

    /// Cell rectangle covering both corner pixels, inclusive of their cells.
    fn span(&self, a: Point2D, b: Point2D) -> GridRect {
        let first = self.grid_settings.cell_at(Point2D::new(a.x.min(b.x), a.y.min(b.y)));
        let last = self.grid_settings.cell_at(Point2D::new(a.x.max(b.x), a.y.max(b.y)));
        GridRect::new(first.x, first.y, last.x + 1, last.y + 1)
    }

    fn paint(&self, rect: GridRect, level: i32) -> ToolAction {
        ToolAction::command(CommandType::PaintRect {
            element: TerrainRect::from_rect(rect, self.color.clone()),
            level,
        })
    }
}

impl Tool for PaintTool {
    fn name(&self) -> &'static str {
        match self.mode {
            PaintMode::Brush => "Brush",
            PaintMode::Rect => "Rectangle",
        }
    }

    fn on_press(&mut self, _map: &LevelMap, event: PointerEvent) -> ToolAction {
        self.start = Some(event.position);
        ToolAction::none()
    }

    fn on_drag(&mut self, _map: &LevelMap, event: PointerEvent) -> ToolAction {
        match self.mode {
            PaintMode::Brush => {
                let cell = self.grid_settings.cell_at(event.position);
                self.paint(GridRect::cell(cell), event.level)
            }
            PaintMode::Rect => ToolAction::none(),
        }
    }

    fn on_release(&mut self, _map: &LevelMap, event: PointerEvent) -> ToolAction {
        let action = match (self.mode, self.start) {
            (PaintMode::Rect, Some(start)) => self.paint(self.span(start, event.position), event.level),
            _ => ToolAction::none(),
        };
        self.start = None;
        action
    }

    fn cleanup(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapType;

    fn painted(action: &ToolAction) -> [i32; 4] {
        match action.commands.as_slice() {
            [CommandType::PaintRect { element, .. }] => element.coords(),
            other => panic!("expected one paint command, got {:?}", other),
        }
    }

    #[test]
    fn test_brush_paints_cell_under_pointer() {
        let map = LevelMap::new("Paint", 10, 10, 1.5, MapType::Inside).unwrap();
        let mut tool = PaintTool::default();
        tool.on_press(&map, PointerEvent::new(41.0, 41.0, 0));
        let action = tool.on_drag(&map, PointerEvent::new(45.0, 63.0, 0));
        assert_eq!(painted(&action), [2, 3, 3, 4]);
    }

    #[test]
    fn test_rect_spans_both_corners_in_any_direction() {
        let map = LevelMap::new("Paint", 10, 10, 1.5, MapType::Inside).unwrap();
        let mut tool = PaintTool::default();
        tool.set_mode(PaintMode::Rect);
        tool.set_color(palette::WATER);

        tool.on_press(&map, PointerEvent::new(95.0, 70.0, 0));
        assert!(tool.on_drag(&map, PointerEvent::new(50.0, 50.0, 0)).is_empty());
        let action = tool.on_release(&map, PointerEvent::new(21.0, 10.0, 0));
        assert_eq!(painted(&action), [1, 0, 5, 4]);

        // A release without a press paints nothing.
        assert!(tool.on_release(&map, PointerEvent::new(21.0, 10.0, 0)).is_empty());
    }
}
