//! Editor configuration and user settings.

use crate::selection::HANDLE_HIT_TOLERANCE;
use crate::snap::{ANGLE_SNAP_INCREMENT, GRID_SIZE, SNAP_THRESHOLD};
use crate::viewport::{INITIAL_SCALE, MAX_SCALE, MIN_SCALE};
use serde::{Deserialize, Serialize};

/// Fixed editor tuning, passed in at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid spacing in world units.
    pub grid_size: f64,
    /// Corner snap distance in screen pixels.
    pub snap_threshold: f64,
    pub initial_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Rotation step used while snapping is on, in degrees.
    pub rotation_snap_increment: f64,
    /// Handle hit radius in screen pixels.
    pub handle_tolerance: f64,
    /// Extra hit slop around element bodies, in screen pixels.
    pub body_tolerance: f64,
    /// Cap on stored undo snapshots. `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Padding used by fit-to-content, in screen pixels.
    pub fit_padding: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_threshold: SNAP_THRESHOLD,
            initial_scale: INITIAL_SCALE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            rotation_snap_increment: ANGLE_SNAP_INCREMENT,
            handle_tolerance: HANDLE_HIT_TOLERANCE,
            body_tolerance: 0.0,
            history_limit: None,
            fit_padding: 50.0,
        }
    }
}

/// User-facing toggles. Read once when an editor starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    pub grid_visible: bool,
    pub snapping_enabled: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_visible: true,
            snapping_enabled: true,
        }
    }
}
