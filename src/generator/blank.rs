// src/generator/blank.rs

use crate::error::Result;
use crate::generator::MapSettings;
use crate::map::{palette, LevelMap, MapType};

pub(crate) fn generate(settings: &MapSettings) -> Result<LevelMap> {
    let mut map = LevelMap::new(
        "New Blank Map",
        settings.width,
        settings.height,
        settings.grid_scale,
        MapType::Outside,
    )?;
    map.paint_background(0, palette::BACKGROUND);
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_map_is_one_background_rect() {
        let map = generate(&MapSettings::default()).unwrap();
        let level = map.level(0).unwrap();
        assert_eq!(level.elements().len(), 1);
        assert_eq!(level.elements()[0].color(), palette::BACKGROUND);
        assert!(level.tokens().is_empty());
        assert!(level.landmarks().is_empty());
    }
}
