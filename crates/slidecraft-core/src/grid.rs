//! Grid policy: visibility, snapping, and cell size.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid cell size in pixels (matches the visual grid).
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Editor-wide grid settings, read by every drag and resize operation.
///
/// Passed explicitly into the interaction engines rather than living as
/// ambient state, so geometry stays a pure function of
/// `(session, pointer, policy)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPolicy {
    /// Whether the render layer should paint grid lines.
    pub show_grid_lines: bool,
    /// Whether drag/resize geometry snaps to the grid.
    pub snap_to_grid: bool,
    /// Grid cell size in pixels; must be positive for snapping to apply.
    pub grid_size: f64,
}

impl Default for GridPolicy {
    fn default() -> Self {
        Self {
            show_grid_lines: true,
            snap_to_grid: true,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridPolicy {
    /// Round `value` to the nearest grid multiple when snapping is enabled;
    /// identity otherwise.
    pub fn snap(&self, value: f64) -> f64 {
        if !self.snap_to_grid || self.grid_size <= 0.0 {
            return value;
        }
        (value / self.grid_size).round() * self.grid_size
    }

    /// Snap both axes of a point.
    pub fn snap_point(&self, point: Point) -> Point {
        Point::new(self.snap(point.x), self.snap(point.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_nearest_cell() {
        let policy = GridPolicy::default();
        assert_eq!(policy.snap(23.0), 20.0);
        assert_eq!(policy.snap(31.0), 40.0);
        assert_eq!(policy.snap(40.0), 40.0);
    }

    #[test]
    fn test_snap_point() {
        let policy = GridPolicy::default();
        assert_eq!(policy.snap_point(Point::new(23.0, 47.0)), Point::new(20.0, 40.0));
    }

    #[test]
    fn test_snap_disabled_is_identity() {
        let policy = GridPolicy {
            snap_to_grid: false,
            ..GridPolicy::default()
        };
        assert_eq!(policy.snap(23.0), 23.0);
    }

    #[test]
    fn test_degenerate_grid_size_is_identity() {
        let policy = GridPolicy {
            grid_size: 0.0,
            ..GridPolicy::default()
        };
        assert_eq!(policy.snap(23.0), 23.0);
    }
}
