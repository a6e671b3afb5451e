//! Element factory: default geometry for new elements.

use crate::catalog::{Placement, WALL_THICKNESS};
use crate::element::{Element, ElementKind};
use crate::scene::Scene;
use kurbo::Point;

/// Create an element of `kind` centered on a world point, at its default size.
///
/// Drawn kinds (walls) get their default length laid horizontally from the
/// point; interactive wall placement goes through [`create_wall`] instead.
pub fn create(kind: ElementKind, point: Point) -> Element {
    let spec = kind.spec();
    let mut element = Element::new(kind, point.x, point.y, spec.default_width, spec.default_height);
    if spec.placement == Placement::Centered {
        element.set_center(point);
    } else {
        element.y -= element.height / 2.0;
    }
    element
}

/// Create an element from a type name. Unknown names give a generic 100x100 box.
pub fn create_named(name: &str, point: Point) -> Element {
    let kind = ElementKind::parse(name).unwrap_or_else(|| {
        log::warn!("Unknown element type '{}', creating generic element", name);
        ElementKind::Generic
    });
    create(kind, point)
}

/// Create a wall whose centerline runs from `start` to `end`.
pub fn create_wall(start: Point, end: Point) -> Element {
    let delta = end - start;
    let length = delta.hypot();
    let rotation = delta.y.atan2(delta.x).to_degrees();
    let mut wall = Element::new(ElementKind::Wall, 0.0, 0.0, length, WALL_THICKNESS).with_rotation(rotation);
    wall.set_center(start.midpoint(end));
    wall
}

/// Centerline endpoints of an element along its local x axis.
pub fn centerline(element: &Element) -> (Point, Point) {
    let half = element.delta_to_world(kurbo::Vec2::new(element.width / 2.0, 0.0));
    let center = element.center();
    (center - half, center + half)
}

/// The plan a project starts with when nothing has been saved yet.
pub fn starter_scene() -> Scene {
    let wall = |x, y, w, h| Element::new(ElementKind::Wall, x, y, w, h);
    Scene::from_elements(vec![
        wall(50.0, 50.0, 400.0, WALL_THICKNESS),
        wall(50.0, 350.0, 400.0, WALL_THICKNESS),
        wall(450.0, 50.0, WALL_THICKNESS, 310.0),
        wall(50.0, 50.0, WALL_THICKNESS, 310.0),
        Element::new(ElementKind::Window, 100.0, 100.0, 80.0, WALL_THICKNESS),
        Element::new(ElementKind::Door, 200.0, 150.0, 90.0, WALL_THICKNESS),
    ])
}
