//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Scale the editor opens at.
pub const INITIAL_SCALE: f64 = 1.5;
/// Smallest allowed scale.
pub const MIN_SCALE: f64 = 0.2;
/// Largest allowed scale.
pub const MAX_SCALE: f64 = 3.0;
/// Scale change per unit of vertical wheel delta.
pub const WHEEL_ZOOM_FACTOR: f64 = 0.001;
/// Scale change applied by the zoom-in / zoom-out commands.
pub const ZOOM_STEP: f64 = 0.1;

/// Viewport manages the view transform for the plan canvas.
///
/// World coordinates are plan units. Screen coordinates are host pixels; the
/// canvas itself starts at `origin` on screen, and `offset` is the pan measured
/// from that origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Pan offset in screen units, relative to the canvas origin.
    pub offset: Vec2,
    /// Current zoom factor.
    pub scale: f64,
    /// Minimum allowed scale.
    pub min_scale: f64,
    /// Maximum allowed scale.
    pub max_scale: f64,
    /// Screen position of the canvas' top-left corner.
    pub origin: Point,
    /// Canvas size in screen units.
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::with_limits(INITIAL_SCALE, MIN_SCALE, MAX_SCALE)
    }
}

impl Viewport {
    /// Create a viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with explicit scale limits. The initial scale is clamped.
    pub fn with_limits(initial_scale: f64, min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Self {
            offset: Vec2::ZERO,
            scale: initial_scale.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
            origin: Point::ZERO,
            size: Size::new(800.0, 600.0),
        }
    }

    /// World-to-screen transform, used for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin.to_vec2() + self.offset) * Affine::scale(self.scale)
    }

    /// Screen-to-world transform, used for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-(self.origin.to_vec2() + self.offset))
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert a screen-space length (e.g. a pixel tolerance) to world units.
    pub fn screen_length_to_world(&self, length: f64) -> f64 {
        length / self.scale
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the pan offset directly.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Set where the canvas sits on screen and how large it is.
    pub fn set_bounds(&mut self, origin: Point, size: Size) {
        self.origin = origin;
        self.size = size;
    }

    /// Change the scale by an additive `delta`, keeping `screen_point` fixed.
    ///
    /// The resulting scale is clamped to `[min_scale, max_scale]`; if clamping
    /// leaves the scale unchanged nothing moves.
    pub fn zoom_at(&mut self, screen_point: Point, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let new_scale = (self.scale + delta).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let mouse = screen_point - self.origin;
        let ratio = new_scale / self.scale;
        self.offset = mouse - (mouse - self.offset) * ratio;
        self.scale = new_scale;
    }

    /// Apply a mouse-wheel zoom. Negative `delta_y` (wheel up) zooms in.
    pub fn zoom_wheel(&mut self, screen_point: Point, delta_y: f64) {
        self.zoom_at(screen_point, -delta_y * WHEEL_ZOOM_FACTOR);
    }

    /// Zoom in one step about the canvas center.
    pub fn zoom_in(&mut self) {
        self.zoom_at(self.screen_center(), ZOOM_STEP);
    }

    /// Zoom out one step about the canvas center.
    pub fn zoom_out(&mut self) {
        self.zoom_at(self.screen_center(), -ZOOM_STEP);
    }

    /// Center of the canvas in screen coordinates.
    pub fn screen_center(&self) -> Point {
        self.origin + Vec2::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Zoom level as a whole percentage, for display.
    pub fn zoom_percent(&self) -> i32 {
        (self.scale * 100.0).round() as i32
    }

    /// Reset pan and zoom.
    pub fn reset(&mut self, initial_scale: f64) {
        self.offset = Vec2::ZERO;
        self.scale = initial_scale.clamp(self.min_scale, self.max_scale);
    }

    /// Fit the view to show the given world rectangle.
    pub fn fit_to_bounds(&mut self, bounds: Rect, padding: f64, initial_scale: f64) {
        if bounds.is_zero_area() {
            self.reset(initial_scale);
            return;
        }

        let padded = Size::new(
            (self.size.width - padding * 2.0).max(1.0),
            (self.size.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        self.scale = scale_x.min(scale_y).clamp(self.min_scale, self.max_scale);

        let bounds_center = bounds.center();
        self.offset = Vec2::new(
            self.size.width / 2.0 - bounds_center.x * self.scale,
            self.size.height / 2.0 - bounds_center.y * self.scale,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9, "{a:?} != {b:?}");
        assert!((a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.scale - INITIAL_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset_and_scale() {
        let mut viewport = Viewport::new();
        viewport.scale = 2.0;
        viewport.offset = Vec2::new(50.0, 100.0);
        let world = viewport.screen_to_world(Point::new(150.0, 300.0));
        assert_close(world, Point::new(50.0, 100.0));
    }

    #[test]
    fn test_origin_is_subtracted() {
        let mut viewport = Viewport::new();
        viewport.scale = 1.0;
        viewport.origin = Point::new(200.0, 64.0);
        let world = viewport.screen_to_world(Point::new(210.0, 74.0));
        assert_close(world, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::new();
        viewport.origin = Point::new(12.0, 40.0);
        for &(scale, offset) in &[
            (0.2, Vec2::new(30.0, -20.0)),
            (1.5, Vec2::new(-410.5, 77.25)),
            (3.0, Vec2::new(0.0, 999.0)),
        ] {
            viewport.scale = scale;
            viewport.offset = offset;
            for &p in &[Point::new(123.0, 456.0), Point::new(-7.5, 0.0), Point::new(1e4, -3e3)] {
                let back = viewport.world_to_screen(viewport.screen_to_world(p));
                assert_close(back, p);
            }
        }
    }

    #[test]
    fn test_zoom_keeps_cursor_fixed() {
        let mut viewport = Viewport::new();
        viewport.origin = Point::new(100.0, 50.0);
        viewport.offset = Vec2::new(20.0, -30.0);
        let cursor = Point::new(400.0, 300.0);
        let before = viewport.screen_to_world(cursor);

        viewport.zoom_at(cursor, 0.5);

        assert!((viewport.scale - 2.0).abs() < 1e-12);
        assert_close(viewport.screen_to_world(cursor), before);
    }

    #[test]
    fn test_wheel_zoom_direction() {
        let mut viewport = Viewport::new();
        viewport.zoom_wheel(Point::ZERO, -100.0);
        assert!((viewport.scale - 1.6).abs() < 1e-12);
        viewport.zoom_wheel(Point::ZERO, 200.0);
        assert!((viewport.scale - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new();
        viewport.zoom_at(Point::ZERO, -100.0);
        assert!((viewport.scale - MIN_SCALE).abs() < f64::EPSILON);

        viewport.zoom_at(Point::ZERO, 100.0);
        assert!((viewport.scale - MAX_SCALE).abs() < f64::EPSILON);

        let offset = viewport.offset;
        viewport.zoom_at(Point::new(300.0, 300.0), 1.0);
        assert_eq!(viewport.offset, offset);
    }

    #[test]
    fn test_zoom_buttons_anchor_at_center() {
        let mut viewport = Viewport::new();
        viewport.set_bounds(Point::new(10.0, 10.0), Size::new(400.0, 200.0));
        let center = viewport.screen_center();
        let before = viewport.screen_to_world(center);
        viewport.zoom_in();
        assert!((viewport.scale - 1.6).abs() < 1e-12);
        assert_close(viewport.screen_to_world(center), before);
        viewport.zoom_out();
        viewport.zoom_out();
        assert!((viewport.scale - 1.4).abs() < 1e-12);
        assert_eq!(viewport.zoom_percent(), 140);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new();
        viewport.pan(Vec2::new(10.0, 20.0));
        assert!((viewport.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((viewport.offset.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_to_bounds_centers_content() {
        let mut viewport = Viewport::new();
        viewport.size = Size::new(1000.0, 800.0);
        let bounds = Rect::new(0.0, 0.0, 450.0, 360.0);
        viewport.fit_to_bounds(bounds, 50.0, INITIAL_SCALE);

        let center = viewport.world_to_screen(bounds.center());
        assert_close(center, Point::new(500.0, 400.0));
        assert!(viewport.scale <= MAX_SCALE && viewport.scale >= MIN_SCALE);
    }

    #[test]
    fn test_fit_to_empty_bounds_resets() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(5.0, 5.0);
        viewport.scale = 2.5;
        viewport.fit_to_bounds(Rect::ZERO, 50.0, INITIAL_SCALE);
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.scale - INITIAL_SCALE).abs() < f64::EPSILON);
    }
}
