//! # Utility Module
//!
//! Miscellaneous helpers used by the generators and the editor tools.

/// Clamps a value between a minimum and maximum.
///
/// # Arguments
///
/// * `value` - The input value to be clamped.
/// * `min` - The minimum allowable value.
/// * `max` - The maximum allowable value.
///
/// # Examples
///
/// ```
/// use rpg_mapper::utils::util::clamp;
///
/// assert_eq!(clamp(5, 0, 10), 5);
/// assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
/// assert_eq!(clamp(15, 0, 10), 10);
/// ```
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Converts a pixel coordinate to the grid cell that contains it.
pub fn pixel_to_cell(pixel: f64, cell_size: u32) -> i32 {
    (pixel / cell_size as f64).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_within_bounds() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
    }

    #[test]
    fn test_clamp_below_bounds() {
        assert_eq!(clamp(-5, 0, 10), 0);
    }

    #[test]
    fn test_clamp_above_bounds() {
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_pixel_to_cell_floors() {
        assert_eq!(pixel_to_cell(39.9, 20), 1);
        assert_eq!(pixel_to_cell(40.0, 20), 2);
        assert_eq!(pixel_to_cell(-1.0, 20), -1);
    }
}
