// src/generator/mod.rs
//! # Procedural map generation
//!
//! Every generator is a pure function from settings and a random source to a
//! fresh [`LevelMap`]. The result replaces whatever map is currently being
//! edited; it is never merged into one.

mod blank;
mod dungeon;
mod placement;
mod road;
mod town;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::map::level_map::validate_dimensions;
use crate::map::LevelMap;

pub use town::TownLayout;

/// Largest dungeon room count a request may ask for.
pub const MAX_ROOM_COUNT: u32 = 10_000;

/// Map-wide settings shared by every generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub width: i32,
    pub height: i32,
    /// Real-world distance per cell edge.
    pub grid_scale: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            grid_scale: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonSettings {
    pub room_count: u32,
    pub min_size: i32,
    pub max_size: i32,
}

impl Default for DungeonSettings {
    fn default() -> Self {
        Self {
            room_count: 30,
            min_size: 5,
            max_size: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadSettings {
    pub path_width: i32,
    /// Number of scenery placement attempts.
    pub scenery_density: u32,
}

impl Default for RoadSettings {
    fn default() -> Self {
        Self {
            path_width: 3,
            scenery_density: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownSettings {
    pub layout: TownLayout,
    pub building_count: u32,
}

impl Default for TownSettings {
    fn default() -> Self {
        Self {
            layout: TownLayout::Crossroads,
            building_count: 8,
        }
    }
}

/// The kind of map to generate, with its kind-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum GeneratorKind {
    #[default]
    Blank,
    Dungeon(DungeonSettings),
    WindingRoad(RoadSettings),
    SimpleTown(TownSettings),
}

impl GeneratorKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Blank => "Blank",
            GeneratorKind::Dungeon(_) => "Dungeon",
            GeneratorKind::WindingRoad(_) => "Winding Road",
            GeneratorKind::SimpleTown(_) => "Simple Town",
        }
    }
}

/// A complete generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub kind: GeneratorKind,
    #[serde(default)]
    pub settings: MapSettings,
}

impl GenerationRequest {
    pub fn new(kind: GeneratorKind, settings: MapSettings) -> Self {
        Self { kind, settings }
    }

    /// Rejects settings that cannot produce a map. Runs before any generation
    /// work starts.
    pub fn validate(&self) -> Result<()> {
        let settings = &self.settings;
        validate_dimensions(settings.width, settings.height, settings.grid_scale)?;

        match &self.kind {
            GeneratorKind::Blank => Ok(()),
            GeneratorKind::Dungeon(dungeon) => {
                if dungeon.room_count > MAX_ROOM_COUNT {
                    return Err(MapError::InvalidSettings(format!(
                        "room count must be at most {}, got {}",
                        MAX_ROOM_COUNT, dungeon.room_count
                    )));
                }
                if dungeon.min_size < 1 || dungeon.max_size < dungeon.min_size {
                    return Err(MapError::InvalidSettings(format!(
                        "room sizes must satisfy 1 <= min <= max, got {}..{}",
                        dungeon.min_size, dungeon.max_size
                    )));
                }
                Ok(())
            }
            GeneratorKind::WindingRoad(road) => {
                if road.path_width < 1 || road.path_width > settings.height {
                    return Err(MapError::InvalidSettings(format!(
                        "path width must be between 1 and the map height ({}), got {}",
                        settings.height, road.path_width
                    )));
                }
                Ok(())
            }
            GeneratorKind::SimpleTown(_) => {
                if settings.width < town::MIN_TOWN_SIDE || settings.height < town::MIN_TOWN_SIDE {
                    return Err(MapError::InvalidSettings(format!(
                        "towns need at least {0}x{0} cells, got {1}x{2}",
                        town::MIN_TOWN_SIDE,
                        settings.width,
                        settings.height
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Generates a fresh map for the request.
pub fn generate(request: &GenerationRequest, rng: &mut impl Rng) -> Result<LevelMap> {
    request.validate()?;
    let settings = &request.settings;
    info!(
        "Generating {} map ({}x{}, scale {})",
        request.kind.name(),
        settings.width,
        settings.height,
        settings.grid_scale
    );

    let map = match &request.kind {
        GeneratorKind::Blank => blank::generate(settings)?,
        GeneratorKind::Dungeon(dungeon) => dungeon::generate(settings, dungeon, rng)?,
        GeneratorKind::WindingRoad(road) => road::generate(settings, road, rng)?,
        GeneratorKind::SimpleTown(town) => town::generate(settings, town, rng)?,
    };

    let elements = map.level(0).map_or(0, |level| level.elements().len());
    info!("Generated '{}' with {} terrain elements", map.name, elements);
    Ok(map)
}

/// Generates with a deterministic random source.
pub fn generate_seeded(request: &GenerationRequest, seed: u64) -> Result<LevelMap> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(request, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapType;

    fn request(kind: GeneratorKind) -> GenerationRequest {
        GenerationRequest::new(kind, MapSettings::default())
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let mut req = request(GeneratorKind::Dungeon(DungeonSettings::default()));
        req.settings.grid_scale = 0.0;
        assert!(matches!(generate_seeded(&req, 1), Err(MapError::InvalidSettings(_))));
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut req = request(GeneratorKind::Blank);
        req.settings.height = -4;
        assert!(matches!(generate_seeded(&req, 1), Err(MapError::InvalidSettings(_))));
    }

    #[test]
    fn test_rejects_inverted_room_sizes() {
        let req = request(GeneratorKind::Dungeon(DungeonSettings {
            room_count: 5,
            min_size: 9,
            max_size: 4,
        }));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_huge_room_count() {
        let req = GenerationRequest::new(
            GeneratorKind::Dungeon(DungeonSettings {
                room_count: 2_000_000_000,
                min_size: 5,
                max_size: 8,
            }),
            MapSettings {
                width: 6,
                height: 6,
                grid_scale: 1.0,
            },
        );
        assert!(matches!(generate_seeded(&req, 1), Err(MapError::InvalidSettings(_))));
    }

    #[test]
    fn test_rejects_oversized_path() {
        let req = request(GeneratorKind::WindingRoad(RoadSettings {
            path_width: 51,
            scenery_density: 0,
        }));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_every_kind_paints_background_first() {
        let kinds = [
            GeneratorKind::Blank,
            GeneratorKind::Dungeon(DungeonSettings::default()),
            GeneratorKind::WindingRoad(RoadSettings::default()),
            GeneratorKind::SimpleTown(TownSettings::default()),
        ];
        for kind in kinds {
            let map = generate_seeded(&request(kind), 42).unwrap();
            let first = &map.level(0).unwrap().elements()[0];
            assert_eq!(first.coords(), [0, 0, 50, 50]);
            assert_eq!(map.grid_scale(), 1.5);
        }
    }

    #[test]
    fn test_map_types() {
        let dungeon = generate_seeded(&request(GeneratorKind::Dungeon(DungeonSettings::default())), 3).unwrap();
        assert_eq!(dungeon.map_type, MapType::Inside);
        let road = generate_seeded(&request(GeneratorKind::WindingRoad(RoadSettings::default())), 3).unwrap();
        assert_eq!(road.map_type, MapType::Outside);
    }

    #[test]
    fn test_same_seed_same_map() {
        let req = request(GeneratorKind::SimpleTown(TownSettings::default()));
        assert_eq!(generate_seeded(&req, 7).unwrap(), generate_seeded(&req, 7).unwrap());
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "kind": {"Dungeon": {"room_count": 10, "min_size": 5, "max_size": 8}},
            "settings": {"width": 40, "height": 30, "grid_scale": 2.0}
        }"#;
        let req: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.settings.width, 40);
        assert_eq!(
            req.kind,
            GeneratorKind::Dungeon(DungeonSettings {
                room_count: 10,
                min_size: 5,
                max_size: 8
            })
        );
    }
}
