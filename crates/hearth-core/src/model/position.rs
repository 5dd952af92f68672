// ── Map geometry ──
//
// Positions are logical pixels on the dashboard map. Clamping keeps a
// marker fully inside its container, one axis at a time.

use serde::{Deserialize, Serialize};

/// A marker position in logical pixels from the map's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whole-pixel coordinates, as the hub persists them.
    pub fn rounded(self) -> (i64, i64) {
        #[allow(clippy::cast_possible_truncation)]
        (self.x.round() as i64, self.y.round() as i64)
    }
}

/// Logical dimensions of the dashboard map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub width: f64,
    pub height: f64,
}

impl MapBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp `target` so a `marker_width` x `marker_height` marker stays
    /// fully inside the map: each axis independently limited to
    /// `[0, container - marker]`.
    ///
    /// A marker larger than the map clamps to 0 rather than producing a
    /// negative bound.
    pub fn clamp(&self, target: Position, marker_width: f64, marker_height: f64) -> Position {
        let max_x = (self.width - marker_width).max(0.0);
        let max_y = (self.height - marker_height).max(0.0);
        Position {
            x: target.x.clamp(0.0, max_x),
            y: target.y.clamp(0.0, max_y),
        }
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_container_minus_marker() {
        let map = MapBounds::new(500.0, 300.0);
        let clamped = map.clamp(Position::new(450.0, 100.0), 100.0, 50.0);
        assert_eq!(clamped, Position::new(400.0, 100.0));
    }

    #[test]
    fn negative_targets_clamp_to_zero() {
        let map = MapBounds::new(500.0, 300.0);
        let clamped = map.clamp(Position::new(-20.0, -3.0), 100.0, 50.0);
        assert_eq!(clamped, Position::new(0.0, 0.0));
    }

    #[test]
    fn oversized_marker_clamps_to_origin() {
        let map = MapBounds::new(50.0, 50.0);
        let clamped = map.clamp(Position::new(10.0, 10.0), 100.0, 100.0);
        assert_eq!(clamped, Position::new(0.0, 0.0));
    }

    #[test]
    fn rounding_matches_the_wire_format() {
        assert_eq!(Position::new(3.5, 2.4).rounded(), (4, 2));
        assert_eq!(Position::new(-0.4, 0.0).rounded(), (0, 0));
    }
}
