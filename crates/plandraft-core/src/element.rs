//! Plan elements: the typed boxes that make up a floor plan.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest width or height any element may have, in world units.
pub const MIN_ELEMENT_SIZE: f64 = 10.0;

/// Unique identifier for elements. Stable for the element's lifetime.
pub type ElementId = String;

/// Generate a fresh element id.
pub fn new_element_id() -> ElementId {
    format!("el_{}", uuid::Uuid::new_v4().simple())
}

/// The kind of an element.
///
/// `Generic` is not a placeable kind. It stands in for records whose stored
/// type name is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Wall,
    Window,
    Door,
    Column,
    Slab,
    Stair,
    Balcony,
    Pillar,
    Arch,
    Chimney,
    Skylight,
    Bathroom,
    Kitchen,
    DiningTable,
    Bed,
    Wardrobe,
    Sofa,
    Armchair,
    CoffeeTable,
    TvUnit,
    Bookshelf,
    Plant,
    Rug,
    Lamp,
    Vase,
    WallClock,
    Mirror,
    Generic,
}

impl ElementKind {
    /// Every placeable kind, in toolbox order.
    pub const ALL: [ElementKind; 27] = [
        ElementKind::Wall,
        ElementKind::Window,
        ElementKind::Door,
        ElementKind::Column,
        ElementKind::Slab,
        ElementKind::Stair,
        ElementKind::Balcony,
        ElementKind::Pillar,
        ElementKind::Arch,
        ElementKind::Chimney,
        ElementKind::Skylight,
        ElementKind::Bathroom,
        ElementKind::Kitchen,
        ElementKind::DiningTable,
        ElementKind::Bed,
        ElementKind::Wardrobe,
        ElementKind::Sofa,
        ElementKind::Armchair,
        ElementKind::CoffeeTable,
        ElementKind::TvUnit,
        ElementKind::Bookshelf,
        ElementKind::Plant,
        ElementKind::Rug,
        ElementKind::Lamp,
        ElementKind::Vase,
        ElementKind::WallClock,
        ElementKind::Mirror,
    ];

    /// Stable wire name of this kind.
    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    /// Parse a placeable kind from its wire name. `generic` is rejected.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }

    /// Whether the kind is placed by dragging out a segment instead of a click.
    pub fn is_drawn(self) -> bool {
        matches!(self.spec().placement, crate::catalog::Placement::Drawn)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ElementKind {
    fn from(name: String) -> Self {
        if name == ElementKind::Generic.as_str() {
            return ElementKind::Generic;
        }
        Self::parse(&name).unwrap_or_else(|| {
            log::warn!("Unknown element type '{}', loading as generic", name);
            ElementKind::Generic
        })
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A placed element.
///
/// `x`/`y` is the top-left corner of the unrotated box. `rotation` is in
/// degrees, clockwise on screen, about the box center, and is never wrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Element {
    /// Create an element with a fresh id. Sizes are clamped to the minimum.
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut element = Self {
            id: new_element_id(),
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
        };
        element.clamp_size();
        element
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Enforce the minimum size. Non-finite sizes collapse to the minimum.
    pub fn clamp_size(&mut self) {
        self.width = clamp_dimension(self.width);
        self.height = clamp_dimension(self.height);
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Unrotated bounds.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move the element so its center lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation.to_radians()
    }

    /// Local-to-world transform (rotation about the center).
    pub fn rotation_transform(&self) -> Affine {
        Affine::rotate_about(self.rotation_radians(), self.center())
    }

    /// Unrotated corners: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.bounds();
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    /// Corners after rotation, in the same order as [`Element::corners`].
    pub fn rotated_corners(&self) -> [Point; 4] {
        let t = self.rotation_transform();
        self.corners().map(|p| t * p)
    }

    /// World-axis-aligned bounding box of the rotated element.
    pub fn aabb(&self) -> Rect {
        let [first, rest @ ..] = self.rotated_corners();
        rest.iter()
            .fold(Rect::from_points(first, first), |acc, &p| acc.union_pt(p))
    }

    /// Map a world point into the element's unrotated frame.
    pub fn to_local(&self, point: Point) -> Point {
        self.rotation_transform().inverse() * point
    }

    /// Rotate a world-space delta into the element's local axes.
    pub fn delta_to_local(&self, delta: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation_radians().sin_cos();
        Vec2::new(delta.x * cos + delta.y * sin, -delta.x * sin + delta.y * cos)
    }

    /// Rotate a local-axis delta into world space.
    pub fn delta_to_world(&self, delta: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation_radians().sin_cos();
        Vec2::new(delta.x * cos - delta.y * sin, delta.x * sin + delta.y * cos)
    }

    /// Rotation-aware hit test. `tolerance` is in world units.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(self.to_local(point))
    }

    /// Whether the element's geometry (everything but the id) equals `other`'s.
    pub fn same_geometry(&self, other: &Element) -> bool {
        self.kind == other.kind
            && self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
            && self.rotation == other.rotation
    }
}

fn clamp_dimension(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_ELEMENT_SIZE)
    } else {
        MIN_ELEMENT_SIZE
    }
}
