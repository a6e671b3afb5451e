//! Snap functionality for aligning points to the grid and to element corners.

use crate::element::ElementId;
use crate::scene::Scene;
use kurbo::Point;

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: f64 = 20.0;

/// Corner snap distance in screen pixels. Divided by the view scale before use.
pub const SNAP_THRESHOLD: f64 = 15.0;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 15.0;

/// What a snapped point ended up attached to.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapTarget {
    /// Snapping was off; the point is unchanged.
    None,
    /// Nearest grid intersection.
    Grid,
    /// A corner of another element.
    Corner { element: ElementId, index: usize },
}

/// Result of a snap operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    pub target: SnapTarget,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            target: SnapTarget::None,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.target != SnapTarget::None
    }
}

/// Corrects raw world points to the grid or nearby element corners.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapEngine {
    pub enabled: bool,
    pub grid_size: f64,
    /// Corner threshold in screen pixels.
    pub threshold: f64,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_size: GRID_SIZE,
            threshold: SNAP_THRESHOLD,
        }
    }
}

impl SnapEngine {
    pub fn new(enabled: bool, grid_size: f64, threshold: f64) -> Self {
        Self {
            enabled,
            grid_size,
            threshold,
        }
    }

    /// Snap `point` against the grid and the unrotated corners of every element
    /// in `scene` other than `exclude`.
    ///
    /// The grid candidate is the starting best. A corner replaces it only when
    /// it is within `threshold / scale` and strictly closer than the current
    /// best, so ties keep the grid point (or the earlier corner).
    pub fn snap(&self, point: Point, scene: &Scene, exclude: Option<&str>, scale: f64) -> SnapResult {
        if !self.enabled {
            return SnapResult::none(point);
        }

        let threshold = self.threshold / scale;
        let mut best = SnapResult {
            point: snap_to_grid(point, self.grid_size),
            target: SnapTarget::Grid,
        };
        let mut best_distance = point.distance(best.point);

        for element in scene.iter() {
            if exclude == Some(element.id.as_str()) {
                continue;
            }
            for (index, corner) in element.corners().into_iter().enumerate() {
                let distance = point.distance(corner);
                if distance < threshold && distance < best_distance {
                    best_distance = distance;
                    best = SnapResult {
                        point: corner,
                        target: SnapTarget::Corner {
                            element: element.id.clone(),
                            index,
                        },
                    };
                }
            }
        }

        best
    }
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snap a point to the nearest grid intersection. Exact half cells go to the
/// larger coordinate on both sides of zero.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    Point::new(
        round_half_up(point.x / grid_size) * grid_size,
        round_half_up(point.y / grid_size) * grid_size,
    )
}

/// Round an angle to the nearest increment. Not wrapped into 0..360, so a
/// continuous drag never jumps.
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return angle_degrees;
    }
    round_half_up(angle_degrees / increment) * increment
}

/// Wrap an angle into `[0, 360)` for display.
pub fn normalize_degrees(angle_degrees: f64) -> f64 {
    let wrapped = angle_degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
