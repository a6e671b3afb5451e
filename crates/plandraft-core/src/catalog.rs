//! Per-kind element catalog.
//!
//! One row per [`ElementKind`]: default geometry, placement rule, render color
//! and the extrusion data used by 3D previews. Everything that varies by kind
//! is looked up here.

use crate::element::ElementKind;
use kurbo::Size;
use peniko::Color;

/// Thickness of walls and other thin linear elements.
pub const WALL_THICKNESS: f64 = 10.0;

/// How an element of a kind is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A single click; the default box is centered on the click.
    Centered,
    /// A drag from start to end point; the extent comes from the gesture.
    Drawn,
}

/// Static description of one element kind.
#[derive(Debug, Clone, Copy)]
pub struct ElementSpec {
    pub kind: ElementKind,
    /// Stable wire name.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub default_width: f64,
    pub default_height: f64,
    pub placement: Placement,
    /// Fill color as `0xRRGGBB`.
    pub rgb: u32,
    /// Height of the extruded solid in a 3D preview.
    pub extrusion_height: f64,
    /// Distance of the solid's base above the floor.
    pub elevation: f64,
    /// Whether 2D renderers draw the label inside the box.
    pub show_label: bool,
}

impl ElementSpec {
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    pub fn color(&self) -> Color {
        let [_, r, g, b] = self.rgb.to_be_bytes();
        Color::from_rgb8(r, g, b)
    }
}

const fn row(
    kind: ElementKind,
    name: &'static str,
    label: &'static str,
    size: (f64, f64),
    rgb: u32,
    extrusion: (f64, f64),
) -> ElementSpec {
    ElementSpec {
        kind,
        name,
        label,
        default_width: size.0,
        default_height: size.1,
        placement: Placement::Centered,
        rgb,
        extrusion_height: extrusion.0,
        elevation: extrusion.1,
        show_label: true,
    }
}

const fn drawn(mut spec: ElementSpec) -> ElementSpec {
    spec.placement = Placement::Drawn;
    spec
}

const fn unlabeled(mut spec: ElementSpec) -> ElementSpec {
    spec.show_label = false;
    spec
}

use ElementKind as K;

/// Indexed by `ElementKind as usize`.
static CATALOG: [ElementSpec; 28] = [
    drawn(row(K::Wall, "wall", "Wall", (200.0, WALL_THICKNESS), 0xc7bca1, (250.0, 0.0))),
    row(K::Window, "window", "Window", (80.0, WALL_THICKNESS), 0xa6d8de, (120.0, 90.0)),
    row(K::Door, "door", "Door", (90.0, WALL_THICKNESS), 0xa37c5b, (210.0, 0.0)),
    row(K::Column, "column", "Column", (30.0, 30.0), 0x8d8d8d, (250.0, 0.0)),
    row(K::Slab, "slab", "Slab", (300.0, 200.0), 0xbababa, (20.0, 0.0)),
    row(K::Stair, "stair", "Stair", (100.0, 220.0), 0xb0a494, (250.0, 0.0)),
    row(K::Balcony, "balcony", "Balcony", (300.0, 120.0), 0xdcdcdc, (20.0, 0.0)),
    row(K::Pillar, "pillar", "Pillar", (40.0, 40.0), 0xa9a9a9, (250.0, 0.0)),
    row(K::Arch, "arch", "Arch", (120.0, WALL_THICKNESS), 0xd2b48c, (120.0, 90.0)),
    row(K::Chimney, "chimney", "Chimney", (60.0, 50.0), 0xa0522d, (250.0, 0.0)),
    unlabeled(row(K::Skylight, "skylight", "Skylight", (100.0, 100.0), 0xadd8e6, (2.0, 0.0))),
    row(K::Bathroom, "bathroom", "Bathroom", (180.0, 250.0), 0xf0f8ff, (150.0, 0.0)),
    row(K::Kitchen, "kitchen", "Kitchen", (250.0, 60.0), 0xe0e0e0, (90.0, 0.0)),
    row(K::DiningTable, "dining-table", "Dining Table", (180.0, 100.0), 0x966f33, (75.0, 0.0)),
    row(K::Bed, "bed", "Bed", (160.0, 200.0), 0x8b4513, (50.0, 0.0)),
    row(K::Wardrobe, "wardrobe", "Wardrobe", (150.0, 60.0), 0x8b5a2b, (200.0, 0.0)),
    row(K::Sofa, "sofa", "Sofa", (220.0, 90.0), 0x696969, (70.0, 0.0)),
    row(K::Armchair, "armchair", "Armchair", (80.0, 90.0), 0x808080, (70.0, 0.0)),
    row(K::CoffeeTable, "coffee-table", "Coffee Table", (100.0, 60.0), 0xa0522d, (45.0, 0.0)),
    row(K::TvUnit, "tv-unit", "TV Unit", (180.0, 50.0), 0x4a4a4a, (45.0, 0.0)),
    row(K::Bookshelf, "bookshelf", "Bookshelf", (100.0, 40.0), 0x966f33, (200.0, 0.0)),
    row(K::Plant, "plant", "Plant", (50.0, 50.0), 0x228b22, (80.0, 0.0)),
    unlabeled(row(K::Rug, "rug", "Rug", (200.0, 300.0), 0xd3b8ae, (2.0, 0.0))),
    row(K::Lamp, "lamp", "Lamp", (40.0, 40.0), 0xf0e68c, (60.0, 0.0)),
    row(K::Vase, "vase", "Vase", (25.0, 25.0), 0xffe4e1, (25.0, 0.0)),
    row(K::WallClock, "wall-clock", "Wall Clock", (30.0, 5.0), 0x333333, (5.0, 150.0)),
    row(K::Mirror, "mirror", "Mirror", (60.0, 5.0), 0xe1e1e1, (5.0, 150.0)),
    row(K::Generic, "generic", "Element", (100.0, 100.0), 0xcccccc, (250.0, 0.0)),
];

impl ElementKind {
    /// Catalog row for this kind.
    pub fn spec(self) -> &'static ElementSpec {
        &CATALOG[self as usize]
    }
}

/// All catalog rows, including the generic fallback.
pub fn catalog() -> &'static [ElementSpec] {
    &CATALOG
}
