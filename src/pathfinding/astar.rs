// src/pathfinding/astar.rs

use std::collections::HashSet;

use ::pathfinding::prelude::astar;

use crate::utils::{Cell, GridRect};

/// A* search over a bounded, 4-connected grid.
///
/// Obstacles are expanded once into a blocked-cell set when the finder is
/// built, so a single finder can serve several searches over the same layout.
#[derive(Debug, Clone)]
pub struct GridPathfinder {
    bounds: GridRect,
    blocked: HashSet<Cell>,
}

impl GridPathfinder {
    pub fn new(width: i32, height: i32, obstacles: &[GridRect]) -> Self {
        let blocked = obstacles.iter().flat_map(|rect| rect.cells()).collect();
        Self {
            bounds: GridRect::new(0, 0, width, height),
            blocked,
        }
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    /// Finds a shortest path from `start` to `goal`.
    ///
    /// The returned cells run from `goal` back toward `start`, excluding
    /// `start` itself. The start and goal cells are always enterable, even when
    /// they sit inside an obstacle. Returns `None` when the goal is unreachable
    /// or either endpoint lies off the grid.
    pub fn find_path(&self, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        if !self.bounds.contains(start) || !self.bounds.contains(goal) {
            return None;
        }
        if start == goal {
            return Some(Vec::new());
        }

        let (path, _cost) = astar(
            &start,
            |&cell| self.successors(cell, goal),
            |cell| cell.manhattan(&goal),
            |&cell| cell == goal,
        )?;

        Some(path.into_iter().rev().filter(|&cell| cell != start).collect())
    }

    /// In-bounds, unblocked orthogonal neighbours at unit cost.
    fn successors(&self, cell: Cell, goal: Cell) -> Vec<(Cell, u32)> {
        cell.neighbours()
            .into_iter()
            .filter(|&next| self.bounds.contains(next) && (next == goal || !self.is_blocked(next)))
            .map(|next| (next, 1))
            .collect()
    }
}

/// Convenience wrapper building a one-shot finder.
pub fn find_path(
    width: i32,
    height: i32,
    start: Cell,
    goal: Cell,
    obstacles: &[GridRect],
) -> Option<Vec<Cell>> {
    GridPathfinder::new(width, height, obstacles).find_path(start, goal)
}

/// Merges a cell path into straight horizontal or vertical runs, so a corridor
/// paints as a handful of rectangles instead of one per cell.
pub fn path_to_runs(path: &[Cell]) -> Vec<GridRect> {
    let mut runs = Vec::new();
    let mut iter = path.iter();
    let Some(&first) = iter.next() else {
        return runs;
    };

    let mut run_start = first;
    let mut run_end = first;
    let mut direction: Option<(i32, i32)> = None;
    for &cell in iter {
        let step = (cell.x - run_end.x, cell.y - run_end.y);
        let is_unit = step.0.abs() + step.1.abs() == 1;
        if is_unit && direction.map_or(true, |d| d == step) {
            direction = Some(step);
            run_end = cell;
        } else {
            runs.push(span(run_start, run_end));
            run_start = cell;
            run_end = cell;
            direction = None;
        }
    }
    runs.push(span(run_start, run_end));
    runs
}

fn span(a: Cell, b: Cell) -> GridRect {
    GridRect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x) + 1, a.y.max(b.y) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_grid_path_is_manhattan_length() {
        let finder = GridPathfinder::new(20, 20, &[]);
        let start = Cell::new(2, 3);
        let goal = Cell::new(15, 11);
        let path = finder.find_path(start, goal).unwrap();

        assert_eq!(path.len() as u32, start.manhattan(&goal));
        assert_eq!(path[0], goal);
        assert!(!path.contains(&start));
    }

    #[test]
    fn test_path_is_contiguous() {
        let obstacles = [GridRect::new(5, 0, 6, 15)];
        let start = Cell::new(1, 1);
        let goal = Cell::new(10, 1);
        let path = find_path(20, 20, start, goal, &obstacles).unwrap();

        let mut previous = start;
        for cell in path.iter().rev() {
            assert_eq!(previous.manhattan(cell), 1);
            assert!(!obstacles[0].contains(*cell));
            previous = *cell;
        }
        assert_eq!(previous, goal);
    }

    #[test]
    fn test_routes_around_wall() {
        let obstacles = [GridRect::new(5, 0, 6, 15)];
        let path = find_path(20, 20, Cell::new(1, 1), Cell::new(10, 1), &obstacles).unwrap();
        // Detour down to row 15 and back.
        assert_eq!(path.len(), 9 + 2 * 14);
    }

    #[test]
    fn test_unreachable_goal_reports_no_path() {
        let obstacles = [GridRect::new(5, 0, 6, 20)];
        assert!(find_path(20, 20, Cell::new(1, 1), Cell::new(10, 1), &obstacles).is_none());
    }

    #[test]
    fn test_endpoints_inside_obstacles_are_enterable() {
        let obstacles = [GridRect::new(0, 0, 4, 4), GridRect::new(10, 10, 14, 14)];
        let start = Cell::new(3, 2);
        let goal = Cell::new(10, 10);
        let path = find_path(20, 20, start, goal, &obstacles).unwrap();
        assert_eq!(path.len(), 15);
        assert_eq!(path[0], goal);
    }

    #[test]
    fn test_off_grid_endpoint() {
        assert!(find_path(10, 10, Cell::new(0, 0), Cell::new(10, 0), &[]).is_none());
    }

    #[test]
    fn test_same_start_and_goal() {
        assert_eq!(find_path(10, 10, Cell::new(3, 3), Cell::new(3, 3), &[]), Some(vec![]));
    }

    #[test]
    fn test_path_runs_cover_every_cell() {
        let path = vec![
            Cell::new(5, 3),
            Cell::new(4, 3),
            Cell::new(3, 3),
            Cell::new(3, 2),
            Cell::new(3, 1),
            Cell::new(2, 1),
        ];
        let runs = path_to_runs(&path);
        assert_eq!(runs.len(), 3);
        for cell in &path {
            assert!(runs.iter().any(|r| r.contains(*cell)));
        }
        let area: i32 = runs.iter().map(|r| r.width() * r.height()).sum();
        assert_eq!(area, 6);
    }
}
