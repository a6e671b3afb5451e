//! Pointer gesture state machine.
//!
//! A gesture starts on pointer-down, edits a transient copy of the scene on
//! every move, and on pointer-up turns into an [`Action`] for the editor to
//! apply: usually a single history commit, or nothing at all.

use crate::element::{Element, ElementId};
use crate::factory;
use crate::input::{Modifiers, MouseButton};
use crate::scene::Scene;
use crate::selection::{self, HandleKind, ResizeHandle};
use crate::settings::EditorConfig;
use crate::snap::{SnapEngine, SnapResult};
use crate::tools::ToolKind;
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};

/// The gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Dragging the view. `anchor` is the pointer position minus the pan offset.
    Panning { anchor: Vec2 },
    /// Dragging out a wall between two snapped points.
    Drawing { start: Point, end: Point },
    Moving {
        id: ElementId,
        start: Point,
        original: Element,
    },
    Resizing {
        id: ElementId,
        handle: ResizeHandle,
        start: Point,
        original: Element,
    },
    Rotating { id: ElementId, original: Element },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Panning { .. } => "panning",
            Gesture::Drawing { .. } => "drawing",
            Gesture::Moving { .. } => "moving",
            Gesture::Resizing { .. } => "resizing",
            Gesture::Rotating { .. } => "rotating",
        }
    }
}

/// What the editor should do after a gesture transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// Change the selection without creating an undo step.
    Select(Option<ElementId>),
    /// Add a new element, select it, and commit.
    Place(Element),
    /// Remove an element and commit.
    Delete(ElementId),
    /// Commit this scene as one undo step.
    Commit(Scene),
}

/// Everything a gesture reads from the editor.
pub struct GestureContext<'a> {
    /// Authoritative scene.
    pub scene: &'a Scene,
    pub viewport: &'a mut Viewport,
    pub snap: &'a SnapEngine,
    pub config: &'a EditorConfig,
    pub tool: ToolKind,
}

impl GestureContext<'_> {
    fn snap(&self, point: Point, scene: &Scene) -> SnapResult {
        self.snap.snap(point, scene, scene.selected_id(), self.viewport.scale)
    }
}

/// Gesture state plus the transient working copy of the scene.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    gesture: Gesture,
    working: Option<Scene>,
    snap_point: Option<Point>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Transient scene while a move/resize/rotate is in progress.
    pub fn working_scene(&self) -> Option<&Scene> {
        self.working.as_ref()
    }

    /// Last snapped pointer position (world space) while a gesture is active.
    pub fn snap_point(&self) -> Option<Point> {
        self.snap_point
    }

    /// Wall being drawn, as an overlay that is not part of any scene.
    pub fn preview_wall(&self) -> Option<Element> {
        match &self.gesture {
            Gesture::Drawing { start, end } => Some(factory::create_wall(*start, *end)),
            _ => None,
        }
    }

    /// Handle pointer-down.
    pub fn begin(
        &mut self,
        ctx: &mut GestureContext<'_>,
        screen: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> Action {
        self.cancel();
        let world = ctx.viewport.screen_to_world(screen);

        if ctx.tool.is_select() && (button != MouseButton::Left || modifiers.shift) {
            self.gesture = Gesture::Panning {
                anchor: screen.to_vec2() - ctx.viewport.offset,
            };
            log::debug!("Gesture: panning");
            return Action::None;
        }
        if button != MouseButton::Left {
            return Action::None;
        }

        match ctx.tool {
            ToolKind::Place(kind) => {
                let snapped = ctx.snap(world, ctx.scene).point;
                if kind.is_drawn() {
                    self.gesture = Gesture::Drawing {
                        start: snapped,
                        end: snapped,
                    };
                    self.snap_point = Some(snapped);
                    log::debug!("Gesture: drawing from {:?}", snapped);
                    Action::None
                } else {
                    Action::Place(factory::create(kind, snapped))
                }
            }
            ToolKind::Select => self.begin_select(ctx, world),
        }
    }

    fn begin_select(&mut self, ctx: &GestureContext<'_>, world: Point) -> Action {
        let scale = ctx.viewport.scale;

        if let Some(selected) = ctx.scene.selected_element() {
            let tolerance = ctx.viewport.screen_length_to_world(ctx.config.handle_tolerance);
            if let Some(kind) = selection::handle_at(selected, world, tolerance, scale) {
                let id = selected.id.clone();
                let original = selected.clone();
                self.gesture = match kind {
                    HandleKind::Delete => return Action::Delete(id),
                    HandleKind::Rotate => Gesture::Rotating { id, original },
                    HandleKind::Resize(handle) => Gesture::Resizing {
                        id,
                        handle,
                        start: world,
                        original,
                    },
                };
                self.working = Some(ctx.scene.clone());
                log::debug!("Gesture: {}", self.gesture.name());
                return Action::None;
            }
        }

        let tolerance = ctx.viewport.screen_length_to_world(ctx.config.body_tolerance);
        match ctx.scene.element_at(world, tolerance) {
            Some(element) => {
                let mut working = ctx.scene.clone();
                working.select(&element.id);
                self.working = Some(working);
                self.gesture = Gesture::Moving {
                    id: element.id.clone(),
                    start: world,
                    original: element.clone(),
                };
                log::debug!("Gesture: moving {}", element.id);
                Action::Select(Some(element.id.clone()))
            }
            None => Action::Select(None),
        }
    }

    /// Handle pointer-move.
    pub fn update(&mut self, ctx: &mut GestureContext<'_>, screen: Point) {
        if let Gesture::Panning { anchor } = self.gesture {
            ctx.viewport.set_offset(screen.to_vec2() - anchor);
            return;
        }
        if !self.is_active() {
            return;
        }

        let world = ctx.viewport.screen_to_world(screen);
        let base = self.working.as_ref().unwrap_or(ctx.scene);
        let snapped = ctx.snap(world, base);
        self.snap_point = Some(snapped.point);

        let updated = match &mut self.gesture {
            Gesture::Drawing { end, .. } => {
                *end = snapped.point;
                None
            }
            Gesture::Moving { start, original, .. } => {
                let mut moved = selection::apply_move(original, *start, world);
                if ctx.snap.enabled {
                    let corner = ctx.snap(Point::new(moved.x, moved.y), base).point;
                    moved.x = corner.x;
                    moved.y = corner.y;
                }
                Some(moved)
            }
            Gesture::Resizing {
                handle,
                start,
                original,
                ..
            } => Some(selection::apply_resize(original, *handle, *start, world)),
            Gesture::Rotating { original, .. } => {
                let increment = ctx.snap.enabled.then_some(ctx.config.rotation_snap_increment);
                Some(selection::apply_rotation(original, world, increment))
            }
            Gesture::Idle | Gesture::Panning { .. } => None,
        };

        if let (Some(element), Some(working)) = (updated, self.working.as_mut()) {
            if let Some(slot) = working.get_mut(&element.id) {
                *slot = element;
            }
        }
    }

    /// Handle pointer-up or pointer-leave.
    pub fn end(&mut self, ctx: &GestureContext<'_>) -> Action {
        let gesture = std::mem::take(&mut self.gesture);
        let working = self.working.take();
        self.snap_point = None;

        match gesture {
            Gesture::Drawing { start, end } => {
                if start.distance(end) > ctx.config.grid_size {
                    Action::Place(factory::create_wall(start, end))
                } else {
                    log::debug!("Wall too short, discarded");
                    Action::None
                }
            }
            Gesture::Moving { .. } | Gesture::Resizing { .. } | Gesture::Rotating { .. } => {
                match working {
                    Some(scene) if !scene.same_elements(ctx.scene) => Action::Commit(scene),
                    _ => Action::None,
                }
            }
            Gesture::Panning { .. } | Gesture::Idle => Action::None,
        }
    }

    /// Abandon the gesture and its transient changes.
    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("Gesture cancelled: {}", self.gesture.name());
        }
        self.gesture = Gesture::Idle;
        self.working = None;
        self.snap_point = None;
    }
}
