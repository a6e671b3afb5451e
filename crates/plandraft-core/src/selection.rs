//! Selection handles and the geometry of move/resize/rotate manipulations.

use crate::element::{Element, MIN_ELEMENT_SIZE};
use crate::snap::snap_angle;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Distance of the rotate handle above the top edge, in screen pixels.
pub const ROTATE_HANDLE_OFFSET: f64 = 22.0;
/// Distance of the delete handle below the bottom edge, in screen pixels.
pub const DELETE_HANDLE_OFFSET: f64 = 22.0;

/// Compass position of a resize handle on the unrotated box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
        ResizeHandle::NE,
        ResizeHandle::NW,
        ResizeHandle::SE,
        ResizeHandle::SW,
    ];

    fn has_north(self) -> bool {
        matches!(self, Self::N | Self::NE | Self::NW)
    }

    fn has_south(self) -> bool {
        matches!(self, Self::S | Self::SE | Self::SW)
    }

    fn has_east(self) -> bool {
        matches!(self, Self::E | Self::NE | Self::SE)
    }

    fn has_west(self) -> bool {
        matches!(self, Self::W | Self::NW | Self::SW)
    }

    /// Clockwise angle from north in degrees.
    fn compass_angle(self) -> f64 {
        match self {
            Self::N => 0.0,
            Self::NE => 45.0,
            Self::E => 90.0,
            Self::SE => 135.0,
            Self::S => 180.0,
            Self::SW => 225.0,
            Self::W => 270.0,
            Self::NW => 315.0,
        }
    }

    /// Resize cursor for this handle on an element rotated by `rotation` degrees.
    pub fn cursor(self, rotation: f64) -> CursorIcon {
        let angle = (rotation.rem_euclid(360.0) + self.compass_angle()).rem_euclid(360.0);
        // Opposite directions share a cursor, so fold into one half turn.
        let angle = angle % 180.0;
        if (22.5..67.5).contains(&angle) {
            CursorIcon::NeswResize
        } else if (67.5..112.5).contains(&angle) {
            CursorIcon::EwResize
        } else if (112.5..157.5).contains(&angle) {
            CursorIcon::NwseResize
        } else {
            CursorIcon::NsResize
        }
    }

    /// Position on the unrotated bounds.
    fn local_position(self, element: &Element) -> Point {
        let b = element.bounds();
        let x = if self.has_west() {
            b.x0
        } else if self.has_east() {
            b.x1
        } else {
            b.center().x
        };
        let y = if self.has_north() {
            b.y0
        } else if self.has_south() {
            b.y1
        } else {
            b.center().y
        };
        Point::new(x, y)
    }
}

/// Pointer cursor a host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorIcon {
    Default,
    Crosshair,
    Grab,
    Grabbing,
    Pointer,
    NsResize,
    EwResize,
    NeswResize,
    NwseResize,
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Edge or corner resize handle.
    Resize(ResizeHandle),
    /// Rotation handle above the element.
    Rotate,
    /// Delete button below the element.
    Delete,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in world coordinates) hits this handle.
    /// `tolerance` should already be adjusted for zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }

    /// Cursor to show while hovering this handle.
    pub fn cursor(&self, rotation: f64) -> CursorIcon {
        match self.kind {
            HandleKind::Resize(handle) => handle.cursor(rotation),
            HandleKind::Rotate => CursorIcon::Grab,
            HandleKind::Delete => CursorIcon::Pointer,
        }
    }
}

/// Handles of a selected element viewed at `scale`.
///
/// Resize handles sit on the box. The rotate and delete handles keep a fixed
/// on-screen distance from it, so they never reach into the body at any zoom.
pub fn get_handles(element: &Element, scale: f64) -> Vec<Handle> {
    let t = element.rotation_transform();
    let b = element.bounds();
    let mut handles = Vec::with_capacity(10);
    handles.push(Handle::new(
        t * Point::new(b.center().x, b.y1 + DELETE_HANDLE_OFFSET / scale),
        HandleKind::Delete,
    ));
    handles.push(Handle::new(
        t * Point::new(b.center().x, b.y0 - ROTATE_HANDLE_OFFSET / scale),
        HandleKind::Rotate,
    ));
    for handle in ResizeHandle::ALL {
        handles.push(Handle::new(
            t * handle.local_position(element),
            HandleKind::Resize(handle),
        ));
    }
    handles
}

/// The handle of `element` a press at `point` grabs, if any.
///
/// The nearest handle within `tolerance` (world units) wins. Inside the body a
/// handle only wins when the press is closer to it than to the element's
/// center, so tiny or zoomed-out elements can still be moved.
pub fn hit_handle(element: &Element, point: Point, tolerance: f64, scale: f64) -> Option<Handle> {
    let inside = element.hit_test(point, 0.0);
    let center_distance = point.distance(element.center());
    get_handles(element, scale)
        .into_iter()
        .filter(|h| h.hit_test(point, tolerance))
        .filter(|h| !inside || point.distance(h.position) < center_distance)
        .min_by(|a, b| point.distance(a.position).total_cmp(&point.distance(b.position)))
}

/// Kind of the handle [`hit_handle`] picks.
pub fn handle_at(element: &Element, point: Point, tolerance: f64, scale: f64) -> Option<HandleKind> {
    hit_handle(element, point, tolerance, scale).map(|h| h.kind)
}

/// Translate `original` by the pointer travel `current - start`.
pub fn apply_move(original: &Element, start: Point, current: Point) -> Element {
    let mut element = original.clone();
    let delta = current - start;
    element.x += delta.x;
    element.y += delta.y;
    element
}

/// Resize `original` by dragging `handle` from `start` to `current`.
///
/// The pointer delta is rotated into the element's local axes. Each active
/// edge moves by its share of that delta, the size is clamped to
/// [`MIN_ELEMENT_SIZE`], and the opposite edge stays where it was.
pub fn apply_resize(original: &Element, handle: ResizeHandle, start: Point, current: Point) -> Element {
    let local = original.delta_to_local(current - start);
    let mut width = original.width;
    let mut height = original.height;
    // Center travel in local axes.
    let mut shift = Vec2::ZERO;

    if handle.has_east() {
        width = (original.width + local.x).max(MIN_ELEMENT_SIZE);
        shift.x = (width - original.width) / 2.0;
    } else if handle.has_west() {
        width = (original.width - local.x).max(MIN_ELEMENT_SIZE);
        shift.x = -(width - original.width) / 2.0;
    }
    if handle.has_south() {
        height = (original.height + local.y).max(MIN_ELEMENT_SIZE);
        shift.y = (height - original.height) / 2.0;
    } else if handle.has_north() {
        height = (original.height - local.y).max(MIN_ELEMENT_SIZE);
        shift.y = -(height - original.height) / 2.0;
    }

    let center = original.center() + original.delta_to_world(shift);
    let mut element = original.clone();
    element.width = width;
    element.height = height;
    element.set_center(center);
    element
}

/// Rotate `original` so its top faces `point`.
///
/// With `increment` set the angle is rounded to it; otherwise it is continuous.
pub fn apply_rotation(original: &Element, point: Point, increment: Option<f64>) -> Element {
    let center = original.center();
    let radians = (point.y - center.y).atan2(point.x - center.x) + FRAC_PI_2;
    let degrees = radians.to_degrees();
    let mut element = original.clone();
    element.rotation = match increment {
        Some(step) => snap_angle(degrees, step),
        None => degrees,
    };
    element
}
