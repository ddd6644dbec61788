// src/generator/placement.rs
// Generation-time footprints (rooms, buildings). Never stored on a map.

use rand::Rng;

use crate::utils::GridRect;

/// Accumulates the footprints accepted so far during one generation run.
/// Overlap checks and pathfinder obstacles both read from it.
#[derive(Debug, Clone)]
pub(crate) struct Footprints {
    rects: Vec<GridRect>,
    padding: i32,
}

impl Footprints {
    pub fn new(padding: i32) -> Self {
        Self {
            rects: Vec::new(),
            padding,
        }
    }

    /// True when `candidate` stays clear of every accepted footprint grown by
    /// the padding.
    pub fn fits(&self, candidate: &GridRect) -> bool {
        !self
            .rects
            .iter()
            .any(|placed| placed.expanded(self.padding).intersects(candidate))
    }

    pub fn push(&mut self, rect: GridRect) {
        self.rects.push(rect);
    }

    pub fn rects(&self) -> &[GridRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn last(&self) -> Option<GridRect> {
        self.rects.last().copied()
    }

    pub fn into_rects(self) -> Vec<GridRect> {
        self.rects
    }
}

/// Samples a rectangle with sides in `min_side..=max_side` lying fully inside
/// `area`. Returns `None` when the sampled size cannot fit.
pub(crate) fn random_rect(
    rng: &mut impl Rng,
    min_side: i32,
    max_side: i32,
    area: GridRect,
) -> Option<GridRect> {
    let width = rng.random_range(min_side..=max_side);
    let height = rng.random_range(min_side..=max_side);
    let max_x = area.x2 - width;
    let max_y = area.y2 - height;
    if max_x < area.x1 || max_y < area.y1 {
        return None;
    }
    let x = rng.random_range(area.x1..=max_x);
    let y = rng.random_range(area.y1..=max_y);
    Some(GridRect::from_origin(x, y, width, height))
}
