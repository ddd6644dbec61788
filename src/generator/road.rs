// src/generator/road.rs

use log::{debug, info};
use rand::Rng;

use crate::error::Result;
use crate::generator::{MapSettings, RoadSettings};
use crate::map::{palette, Landmark, LevelMap, MapType, TerrainRect};
use crate::utils::util::clamp;
use crate::utils::{Cell, GridRect};

/// One column of a meandering band: cells `top..bottom` at `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Band {
    pub x: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Band {
    pub fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.top, self.x + 1, self.bottom)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.x, self.top + (self.bottom - self.top) / 2)
    }

    pub fn covers(&self, cell: Cell) -> bool {
        self.rect().contains(cell)
    }
}

/// Walks left to right across the map. Each column the band's center shifts by
/// -1, 0 or +1, clamped so the whole band stays inside the map.
pub(crate) fn random_walk(width: i32, height: i32, band_width: i32, rng: &mut impl Rng) -> Vec<Band> {
    let half = band_width / 2;
    let min_center = half;
    let max_center = (height - band_width + half).max(min_center);
    let mut center = clamp(height / 2, min_center, max_center);

    let mut bands = Vec::with_capacity(width.max(0) as usize);
    for x in 0..width {
        let top = center - half;
        bands.push(Band {
            x,
            top,
            bottom: top + band_width,
        });
        let step = rng.random_range(-1..=1);
        center = clamp(center + step, min_center, max_center);
    }
    bands
}

pub(crate) fn generate(
    map_settings: &MapSettings,
    settings: &RoadSettings,
    rng: &mut impl Rng,
) -> Result<LevelMap> {
    let mut map = LevelMap::new(
        "Winding Road",
        map_settings.width,
        map_settings.height,
        map_settings.grid_scale,
        MapType::Outside,
    )?;
    map.paint_background(0, palette::GRASS);

    let bands = random_walk(map.width(), map.height(), settings.path_width, rng);
    for band in &bands {
        map.add_element(0, TerrainRect::from_rect(band.rect(), palette::ROAD));
    }

    let mut scenery = 0;
    for _ in 0..settings.scenery_density {
        let cell = Cell::new(
            rng.random_range(0..map.width()),
            rng.random_range(0..map.height()),
        );
        if bands[cell.x as usize].covers(cell) {
            debug!("Scenery at {:?} would block the road", cell);
            continue;
        }
        map.add_element(0, TerrainRect::from_rect(GridRect::cell(cell), palette::SCENERY));
        scenery += 1;
    }

    if let (Some(first), Some(last)) = (bands.first(), bands.last()) {
        map.add_landmark(0, Landmark::new(first.center(), "Start"));
        map.add_landmark(0, Landmark::new(last.center(), "End"));
    }
    let cave = Cell::new(map.width() * 3 / 4, map.height() / 4);
    map.add_landmark(0, Landmark::new(cave, "Cave"));

    info!("Winding road: {} columns, {} scenery points", bands.len(), scenery);
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_walk_stays_in_bounds_and_moves_one_step() {
        let mut rng = StdRng::seed_from_u64(77);
        let bands = random_walk(60, 12, 3, &mut rng);
        assert_eq!(bands.len(), 60);
        for band in &bands {
            assert!(band.top >= 0 && band.bottom <= 12);
            assert_eq!(band.bottom - band.top, 3);
        }
        for pair in bands.windows(2) {
            assert!((pair[1].top - pair[0].top).abs() <= 1);
            assert_eq!(pair[1].x, pair[0].x + 1);
        }
    }

    #[test]
    fn test_walk_with_full_height_band() {
        let mut rng = StdRng::seed_from_u64(2);
        let bands = random_walk(10, 4, 4, &mut rng);
        assert!(bands.iter().all(|b| b.top == 0 && b.bottom == 4));
    }

    fn road_map(seed: u64) -> LevelMap {
        let mut rng = StdRng::seed_from_u64(seed);
        let settings = RoadSettings {
            path_width: 3,
            scenery_density: 200,
        };
        generate(&MapSettings::default(), &settings, &mut rng).unwrap()
    }

    #[test]
    fn test_one_column_per_step() {
        let map = road_map(11);
        let road: Vec<_> = map
            .level(0)
            .unwrap()
            .elements()
            .iter()
            .filter(|e| e.color() == palette::ROAD)
            .collect();
        assert_eq!(road.len(), 50);
        assert!(road.iter().all(|e| e.rect().width() == 1 && e.rect().height() == 3));
    }

    #[test]
    fn test_scenery_never_on_road() {
        let map = road_map(11);
        let elements = map.level(0).unwrap().elements();
        let road: Vec<GridRect> = elements
            .iter()
            .filter(|e| e.color() == palette::ROAD)
            .map(|e| e.rect())
            .collect();
        let scenery: Vec<GridRect> = elements
            .iter()
            .filter(|e| e.color() == palette::SCENERY)
            .map(|e| e.rect())
            .collect();
        assert!(!scenery.is_empty());
        for tree in &scenery {
            assert!(road.iter().all(|r| !r.intersects(tree)));
        }
    }

    #[test]
    fn test_landmarks_at_extremities() {
        let map = road_map(4);
        let level = map.level(0).unwrap();
        assert_eq!(level.landmark("Start").unwrap().x, 0);
        assert_eq!(level.landmark("End").unwrap().x, 49);
        assert_eq!(level.landmark("Cave").unwrap().cell(), Cell::new(37, 12));
    }
}
