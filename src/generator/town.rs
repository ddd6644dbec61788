// src/generator/town.rs

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generator::placement::{random_rect, Footprints};
use crate::generator::road::{random_walk, Band};
use crate::generator::{MapSettings, TownSettings};
use crate::map::{palette, Landmark, LevelMap, MapType, TerrainRect};
use crate::pathfinding::{path_to_runs, GridPathfinder};
use crate::utils::{Cell, GridRect};

/// Smallest width/height a town can be laid out on.
pub(crate) const MIN_TOWN_SIDE: i32 = 12;

const ROAD_WIDTH: i32 = 3;
const RIVER_WIDTH: i32 = 3;
/// Cells kept free on both banks of the river.
const RIVER_BANK: i32 = 2;
const SQUARE_HALF: i32 = 4;
const BUILDING_PADDING: i32 = 2;
const BUILDING_MIN_SIDE: i32 = 4;
const BUILDING_MAX_SIDE: i32 = 9;
const PLACEMENT_ATTEMPTS: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TownLayout {
    #[default]
    Crossroads,
    MainStreet,
    Riverside,
}

/// The line every door path heads for.
#[derive(Debug, Clone)]
enum Axis {
    Vertical(i32),
    Crossing { x: i32, y: i32 },
    River(Vec<Band>),
}

/// Roads, squares and water painted before any building is placed.
#[derive(Debug, Clone)]
struct TownPlan {
    no_build: Vec<GridRect>,
    axis: Axis,
}

impl TownPlan {
    fn blocks(&self, candidate: &GridRect) -> bool {
        self.no_build.iter().any(|zone| zone.intersects(candidate))
    }

    fn in_zone(&self, cell: Cell) -> bool {
        self.no_build.iter().any(|zone| zone.contains(cell))
    }
}

pub(crate) fn generate(
    map_settings: &MapSettings,
    settings: &TownSettings,
    rng: &mut impl Rng,
) -> Result<LevelMap> {
    build(map_settings, settings, rng).map(|(map, _, _)| map)
}

fn build(
    map_settings: &MapSettings,
    settings: &TownSettings,
    rng: &mut impl Rng,
) -> Result<(LevelMap, TownPlan, Vec<GridRect>)> {
    let mut map = LevelMap::new(
        "Generated Town",
        map_settings.width,
        map_settings.height,
        map_settings.grid_scale,
        MapType::Outside,
    )?;
    map.paint_background(0, palette::GRASS);

    let plan = match settings.layout {
        TownLayout::Crossroads => lay_crossroads(&mut map),
        TownLayout::MainStreet => lay_main_street(&mut map),
        TownLayout::Riverside => lay_riverside(&mut map, rng),
    };
    let buildings = place_buildings(&mut map, &plan, settings.building_count, rng);

    info!(
        "Town ({:?}): placed {} of {} buildings",
        settings.layout,
        buildings.len(),
        settings.building_count
    );
    Ok((map, plan, buildings))
}

fn vertical_road(map: &LevelMap) -> GridRect {
    let x = map.width() / 2 - ROAD_WIDTH / 2;
    GridRect::new(x, 0, x + ROAD_WIDTH, map.height())
}

fn horizontal_road(map: &LevelMap) -> GridRect {
    let y = map.height() / 2 - ROAD_WIDTH / 2;
    GridRect::new(0, y, map.width(), y + ROAD_WIDTH)
}

fn lay_crossroads(map: &mut LevelMap) -> TownPlan {
    let center = map.bounds().center();
    let vertical = vertical_road(map);
    let horizontal = horizontal_road(map);
    let square = GridRect::new(
        center.x - SQUARE_HALF,
        center.y - SQUARE_HALF,
        center.x + SQUARE_HALF,
        center.y + SQUARE_HALF,
    );

    map.add_element(0, TerrainRect::from_rect(vertical, palette::ROAD));
    map.add_element(0, TerrainRect::from_rect(horizontal, palette::ROAD));
    map.add_element(0, TerrainRect::from_rect(square, palette::SQUARE));
    map.add_landmark(0, Landmark::new(center, "Town Square"));

    TownPlan {
        no_build: vec![vertical, horizontal, square],
        axis: Axis::Crossing {
            x: center.x,
            y: center.y,
        },
    }
}

fn lay_main_street(map: &mut LevelMap) -> TownPlan {
    let road = vertical_road(map);
    let center_x = road.x1 + ROAD_WIDTH / 2;
    map.add_element(0, TerrainRect::from_rect(road, palette::ROAD));
    map.add_landmark(0, Landmark::new(Cell::new(center_x, map.height() / 2), "Main Street"));

    TownPlan {
        no_build: vec![road],
        axis: Axis::Vertical(center_x),
    }
}

fn lay_riverside(map: &mut LevelMap, rng: &mut impl Rng) -> TownPlan {
    let bands = random_walk(map.width(), map.height(), RIVER_WIDTH, rng);
    let mut no_build = Vec::with_capacity(bands.len() + 1);
    for band in &bands {
        map.add_element(0, TerrainRect::from_rect(band.rect(), palette::WATER));
        no_build.push(GridRect {
            x1: band.x,
            y1: band.top - RIVER_BANK,
            x2: band.x + 1,
            y2: band.bottom + RIVER_BANK,
        });
    }

    let crossing = bands[(map.width() / 2) as usize];
    let bridge = GridRect::new(
        (crossing.x - 1).max(0),
        (crossing.top - 1).max(0),
        (crossing.x + 2).min(map.width()),
        (crossing.bottom + 1).min(map.height()),
    );
    map.add_element(0, TerrainRect::from_rect(bridge, palette::BRIDGE));
    map.add_landmark(0, Landmark::new(crossing.center(), "Bridge"));
    no_build.push(bridge);

    TownPlan {
        no_build,
        axis: Axis::River(bands),
    }
}

/// Door cell on the building edge facing the axis, and the axis cell the door
/// path heads for.
fn door_and_goal(building: &GridRect, axis: &Axis) -> (Cell, Cell) {
    let center = building.center();
    match axis {
        Axis::Vertical(x) => facing_vertical(building, center, *x),
        Axis::Crossing { x, y } => {
            if center.x.abs_diff(*x) <= center.y.abs_diff(*y) {
                facing_vertical(building, center, *x)
            } else {
                facing_horizontal(building, center, *y)
            }
        }
        Axis::River(bands) => {
            let column = center.x.clamp(0, bands.len() as i32 - 1) as usize;
            facing_horizontal(building, center, bands[column].center().y)
        }
    }
}

fn facing_vertical(building: &GridRect, center: Cell, axis_x: i32) -> (Cell, Cell) {
    let door_x = if center.x < axis_x {
        building.x2 - 1
    } else {
        building.x1
    };
    (Cell::new(door_x, center.y), Cell::new(axis_x, center.y))
}

fn facing_horizontal(building: &GridRect, center: Cell, axis_y: i32) -> (Cell, Cell) {
    let door_y = if center.y < axis_y {
        building.y2 - 1
    } else {
        building.y1
    };
    (Cell::new(center.x, door_y), Cell::new(center.x, axis_y))
}

fn place_buildings(
    map: &mut LevelMap,
    plan: &TownPlan,
    count: u32,
    rng: &mut impl Rng,
) -> Vec<GridRect> {
    let area = GridRect::new(1, 1, map.width() - 1, map.height() - 1);
    let mut buildings = Footprints::new(BUILDING_PADDING);

    for index in 0..count {
        let mut placed = false;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let Some(candidate) = random_rect(rng, BUILDING_MIN_SIDE, BUILDING_MAX_SIDE, area)
            else {
                continue;
            };
            if !buildings.fits(&candidate) || plan.blocks(&candidate) {
                continue;
            }

            buildings.push(candidate);
            map.add_element(0, TerrainRect::from_rect(candidate, palette::BUILDING));
            let (door, goal) = door_and_goal(&candidate, &plan.axis);
            map.add_element(0, TerrainRect::from_rect(GridRect::cell(door), palette::DOOR));
            carve_door_path(map, plan, buildings.rects(), door, goal);
            placed = true;
            break;
        }
        if !placed {
            debug!("Building {} found no free lot", index);
        }
    }

    buildings.into_rects()
}

fn carve_door_path(
    map: &mut LevelMap,
    plan: &TownPlan,
    buildings: &[GridRect],
    door: Cell,
    goal: Cell,
) {
    let finder = GridPathfinder::new(map.width(), map.height(), buildings);
    let Some(path) = finder.find_path(door, goal) else {
        debug!("No path from door {:?} to {:?}", door, goal);
        return;
    };
    // Stop painting where the path meets the road or water.
    let open_ground: Vec<Cell> = path.into_iter().filter(|cell| !plan.in_zone(*cell)).collect();
    for run in path_to_runs(&open_ground) {
        map.add_element(0, TerrainRect::from_rect(run, palette::PATH));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn town(layout: TownLayout, seed: u64) -> (LevelMap, TownPlan, Vec<GridRect>) {
        let settings = TownSettings {
            layout,
            building_count: 12,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        build(&MapSettings::default(), &settings, &mut rng).unwrap()
    }

    fn assert_valid_layout(map: &LevelMap, plan: &TownPlan, buildings: &[GridRect]) {
        assert!(buildings.len() <= 12);
        for (i, a) in buildings.iter().enumerate() {
            assert!(a.is_within(map.width(), map.height()));
            assert!((BUILDING_MIN_SIDE..=BUILDING_MAX_SIDE).contains(&a.width()));
            assert!(!plan.blocks(a), "building {:?} in a no-build zone", a);
            for b in buildings.iter().skip(i + 1) {
                assert!(!a.expanded(BUILDING_PADDING).intersects(b));
            }
        }
    }

    #[test]
    fn test_crossroads_layout() {
        let (map, plan, buildings) = town(TownLayout::Crossroads, 21);
        assert!(!buildings.is_empty());
        assert_valid_layout(&map, &plan, &buildings);
        assert!(map.level(0).unwrap().landmark("Town Square").is_some());
    }

    #[test]
    fn test_main_street_layout() {
        let (map, plan, buildings) = town(TownLayout::MainStreet, 8);
        assert!(!buildings.is_empty());
        assert_valid_layout(&map, &plan, &buildings);
    }

    #[test]
    fn test_riverside_layout() {
        let (map, plan, buildings) = town(TownLayout::Riverside, 13);
        assert_valid_layout(&map, &plan, &buildings);
        let level = map.level(0).unwrap();
        assert!(level.landmark("Bridge").is_some());
        let water = level.elements().iter().filter(|e| e.color() == palette::WATER).count();
        assert_eq!(water, 50);
        assert_eq!(
            level.elements().iter().filter(|e| e.color() == palette::BRIDGE).count(),
            1
        );
    }

    #[test]
    fn test_each_building_gets_a_door_on_its_edge() {
        let (map, _, buildings) = town(TownLayout::MainStreet, 30);
        let doors: Vec<GridRect> = map
            .level(0)
            .unwrap()
            .elements()
            .iter()
            .filter(|e| e.color() == palette::DOOR)
            .map(|e| e.rect())
            .collect();
        assert_eq!(doors.len(), buildings.len());
        for (door, building) in doors.iter().zip(&buildings) {
            let cell = Cell::new(door.x1, door.y1);
            assert!(building.contains(cell));
            assert!(cell.x == building.x1 || cell.x == building.x2 - 1);
        }
    }

    #[test]
    fn test_door_faces_the_street() {
        let building = GridRect::new(5, 5, 10, 9);
        let (door, goal) = door_and_goal(&building, &Axis::Vertical(25));
        assert_eq!(door, Cell::new(9, 7));
        assert_eq!(goal, Cell::new(25, 7));

        let (door, goal) = facing_horizontal(&building, building.center(), 2);
        assert_eq!(door, Cell::new(7, 5));
        assert_eq!(goal, Cell::new(7, 2));
    }

    #[test]
    fn test_crossing_picks_nearest_road() {
        let building = GridRect::new(20, 2, 26, 8);
        let (_, goal) = door_and_goal(&building, &Axis::Crossing { x: 25, y: 25 });
        assert_eq!(goal, Cell::new(25, 5));
    }
}
