// src/generator/dungeon.rs

use log::{debug, info};
use rand::Rng;

use crate::error::Result;
use crate::generator::placement::{random_rect, Footprints};
use crate::generator::{DungeonSettings, MapSettings};
use crate::map::{palette, Landmark, LevelMap, MapType, TerrainRect};
use crate::pathfinding::{path_to_runs, GridPathfinder};
use crate::utils::GridRect;

/// Free cells kept between any two rooms.
const ROOM_PADDING: i32 = 2;

/// Sampling attempts per requested room.
const ATTEMPTS_PER_ROOM: u32 = 3;

pub(crate) fn generate(
    map_settings: &MapSettings,
    settings: &DungeonSettings,
    rng: &mut impl Rng,
) -> Result<LevelMap> {
    build(map_settings, settings, rng).map(|(map, _)| map)
}

/// Builds the dungeon and hands back the accepted rooms alongside it.
fn build(
    map_settings: &MapSettings,
    settings: &DungeonSettings,
    rng: &mut impl Rng,
) -> Result<(LevelMap, Vec<GridRect>)> {
    let mut map = LevelMap::new(
        "Generated Dungeon",
        map_settings.width,
        map_settings.height,
        map_settings.grid_scale,
        MapType::Inside,
    )?;
    map.paint_background(0, palette::BACKGROUND);

    // Rooms keep one free cell on the top/left edge and two on the bottom/right.
    let margin = GridRect {
        x1: 1,
        y1: 1,
        x2: map_settings.width - 2,
        y2: map_settings.height - 2,
    };
    let target = settings.room_count as usize;
    let mut rooms = Footprints::new(ROOM_PADDING);
    let mut corridors = 0;

    for attempt in 0..attempt_budget(settings.room_count) {
        if rooms.len() >= target {
            break;
        }
        let Some(candidate) = random_rect(rng, settings.min_size, settings.max_size, margin) else {
            debug!("Attempt {}: room does not fit inside the margin", attempt);
            continue;
        };
        if !rooms.fits(&candidate) {
            debug!("Attempt {}: room {:?} overlaps an existing room", attempt, candidate);
            continue;
        }

        map.add_element(0, TerrainRect::from_rect(candidate, palette::FLOOR));
        if let Some(previous) = rooms.last() {
            if carve_corridor(&mut map, rooms.rects(), previous, candidate) {
                corridors += 1;
            }
        }
        rooms.push(candidate);
    }

    let rooms = rooms.into_rects();
    if let Some(first) = rooms.first() {
        map.add_landmark(0, Landmark::new(first.center(), "Entrance"));
    }
    if rooms.len() >= 2 {
        if let Some(last) = rooms.last() {
            map.add_landmark(0, Landmark::new(last.center(), "Treasure"));
        }
    }

    info!(
        "Dungeon: placed {} of {} rooms, {} corridors",
        rooms.len(),
        target,
        corridors
    );
    Ok((map, rooms))
}

fn attempt_budget(room_count: u32) -> u32 {
    room_count.saturating_mul(ATTEMPTS_PER_ROOM)
}

/// Connects `previous` to `next` center to center, routing around every other
/// accepted room. Returns false when no route exists; the corridor is then
/// left out.
fn carve_corridor(
    map: &mut LevelMap,
    accepted: &[GridRect],
    previous: GridRect,
    next: GridRect,
) -> bool {
    let obstacles: Vec<GridRect> = accepted
        .iter()
        .filter(|room| **room != previous)
        .copied()
        .collect();
    let finder = GridPathfinder::new(map.width(), map.height(), &obstacles);

    match finder.find_path(previous.center(), next.center()) {
        Some(path) => {
            for run in path_to_runs(&path) {
                map.add_element(0, TerrainRect::from_rect(run, palette::FLOOR));
            }
            true
        }
        None => {
            debug!("No corridor from {:?} to {:?}", previous, next);
            false
        }
    }
}
