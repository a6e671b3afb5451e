//! Editor: the plan-editing engine a host drives with input events and commands.

use crate::element::{Element, ElementId};
use crate::error::PlanResult;
use crate::generator;
use crate::history::History;
use crate::input::{KeyEvent, PointerEvent};
use crate::interaction::{Action, Gesture, GestureContext, Interaction};
use crate::scene::Scene;
use crate::selection::{self, CursorIcon};
use crate::settings::{EditorConfig, EditorSettings};
use crate::snap::SnapEngine;
use crate::tools::ToolKind;
use crate::viewport::Viewport;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Partial update of the selected element's geometry. `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

impl ElementPatch {
    fn apply(&self, element: &mut Element) {
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        if let Some(x) = finite(self.x) {
            element.x = x;
        }
        if let Some(y) = finite(self.y) {
            element.y = y;
        }
        if let Some(width) = finite(self.width) {
            element.width = width;
        }
        if let Some(height) = finite(self.height) {
            element.height = height;
        }
        if let Some(rotation) = finite(self.rotation) {
            element.rotation = rotation;
        }
        element.clamp_size();
    }
}

/// The plan editor.
///
/// Owns the undo history (whose current snapshot is the authoritative scene),
/// the view, the active tool and the gesture in progress.
pub struct Editor {
    history: History,
    viewport: Viewport,
    tool: ToolKind,
    snap: SnapEngine,
    interaction: Interaction,
    config: EditorConfig,
    settings: EditorSettings,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Scene::new(), EditorConfig::default(), EditorSettings::default())
    }
}

impl Editor {
    /// Create an editor over `scene`. The scene becomes the first history entry.
    pub fn new(scene: Scene, config: EditorConfig, settings: EditorSettings) -> Self {
        let viewport = Viewport::with_limits(config.initial_scale, config.min_scale, config.max_scale);
        let snap = SnapEngine::new(settings.snapping_enabled, config.grid_size, config.snap_threshold);
        Self {
            history: History::new(scene).with_limit(config.history_limit),
            viewport,
            tool: ToolKind::Select,
            snap,
            interaction: Interaction::new(),
            config,
            settings,
        }
    }

    /// Scene to render: the transient copy during a gesture, else the committed one.
    pub fn scene(&self) -> &Scene {
        self.interaction
            .working_scene()
            .unwrap_or_else(|| self.history.current())
    }

    /// Authoritative scene, ignoring any gesture in progress.
    pub fn committed_scene(&self) -> &Scene {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn settings(&self) -> EditorSettings {
        self.settings
    }

    pub fn gesture(&self) -> &Gesture {
        self.interaction.gesture()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.scene().selected_element()
    }

    /// Wall preview while one is being drawn.
    pub fn preview_wall(&self) -> Option<Element> {
        self.interaction.preview_wall()
    }

    /// Snapped pointer position (world space) to mark while a gesture is active.
    pub fn snap_indicator(&self) -> Option<Point> {
        self.interaction.snap_point()
    }

    /// Switch tools. Any gesture in progress is discarded.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.interaction.cancel();
        self.tool = tool;
        log::debug!("Tool: {}", tool);
    }

    /// Select an element without creating an undo step.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        let mut scene = self.history.current().clone();
        let changed = match id {
            Some(id) => scene.selected_id() != Some(id) && scene.select(id),
            None => {
                let had = scene.selected_id().is_some();
                scene.clear_selection();
                had
            }
        };
        if changed {
            self.history.replace_current(scene);
        }
        changed
    }

    /// Delete the selected element as one undo step.
    pub fn delete_selected(&mut self) -> bool {
        self.interaction.cancel();
        let Some(id) = self.history.current().selected_id().map(str::to_string) else {
            return false;
        };
        self.delete(&id)
    }

    fn delete(&mut self, id: &str) -> bool {
        let mut scene = self.history.current().clone();
        if scene.remove(id).is_none() {
            return false;
        }
        log::info!("Deleted element {}", id);
        self.history.commit(scene);
        true
    }

    /// Edit the selected element's geometry as one undo step.
    ///
    /// Sizes are clamped to the minimum and non-finite values ignored. Returns
    /// false when nothing is selected or nothing changed.
    pub fn update_selected_properties(&mut self, patch: ElementPatch) -> bool {
        self.interaction.cancel();
        let mut scene = self.history.current().clone();
        let Some(element) = scene.selected_element_mut() else {
            return false;
        };
        let before = element.clone();
        patch.apply(element);
        if element.same_geometry(&before) {
            return false;
        }
        self.history.commit(scene);
        true
    }

    pub fn undo(&mut self) -> bool {
        self.interaction.cancel();
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.interaction.cancel();
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the whole plan with generated elements as one undo step.
    ///
    /// A gesture in progress is discarded; the generated plan wins.
    pub fn apply_generated_layout(&mut self, elements: Vec<Element>) {
        self.interaction.cancel();
        let mut scene = Scene::new();
        scene.replace_all(elements);
        log::info!("Applied generated layout with {} elements", scene.len());
        self.history.commit(scene);
    }

    /// Validate a raw generator payload and apply it. On error nothing changes.
    pub fn apply_generated_payload(&mut self, json: &str) -> PlanResult<usize> {
        let elements = generator::into_elements(generator::parse_layout(json)?);
        let count = elements.len();
        self.apply_generated_layout(elements);
        Ok(count)
    }

    /// Start over with a different plan (e.g. another project). Clears history.
    pub fn load_scene(&mut self, scene: Scene) {
        self.interaction.cancel();
        self.history.reset(scene);
    }

    pub fn set_snapping(&mut self, enabled: bool) {
        self.snap.enabled = enabled;
        self.settings.snapping_enabled = enabled;
    }

    pub fn toggle_snapping(&mut self) -> bool {
        self.set_snapping(!self.snap.enabled);
        self.snap.enabled
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.settings.grid_visible = !self.settings.grid_visible;
        self.settings.grid_visible
    }

    pub fn update_settings(&mut self, settings: EditorSettings) {
        self.settings = settings;
        self.snap.enabled = settings.snapping_enabled;
    }

    /// Tell the editor where its canvas sits on screen.
    pub fn set_canvas_bounds(&mut self, origin: Point, size: Size) {
        self.viewport.set_bounds(origin, size);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Frame every element; an empty plan resets the view.
    pub fn fit_to_content(&mut self) {
        match self.history.current().bounds() {
            Some(bounds) => self
                .viewport
                .fit_to_bounds(bounds, self.config.fit_padding, self.config.initial_scale),
            None => self.viewport.reset(self.config.initial_scale),
        }
    }

    /// Feed a pointer event through the gesture state machine.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => {
                let mut ctx = GestureContext {
                    scene: self.history.current(),
                    viewport: &mut self.viewport,
                    snap: &self.snap,
                    config: &self.config,
                    tool: self.tool,
                };
                let action = self.interaction.begin(&mut ctx, position, button, modifiers);
                self.apply(action);
            }
            PointerEvent::Move { position } => {
                let mut ctx = GestureContext {
                    scene: self.history.current(),
                    viewport: &mut self.viewport,
                    snap: &self.snap,
                    config: &self.config,
                    tool: self.tool,
                };
                self.interaction.update(&mut ctx, position);
            }
            PointerEvent::Up { .. } | PointerEvent::Leave => {
                let ctx = GestureContext {
                    scene: self.history.current(),
                    viewport: &mut self.viewport,
                    snap: &self.snap,
                    config: &self.config,
                    tool: self.tool,
                };
                let action = self.interaction.end(&ctx);
                self.apply(action);
            }
            PointerEvent::Scroll { position, delta } => {
                self.viewport.zoom_wheel(position, delta.y);
            }
        }
    }

    /// Apply editor key bindings. Returns true if the key was handled.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        let command = event.modifiers.command();
        if event.is("Escape") {
            self.select_tool(ToolKind::Select);
            self.select(None);
            true
        } else if event.is("Delete") || event.is("Backspace") {
            self.delete_selected()
        } else if command && event.is("z") && event.modifiers.shift {
            self.redo();
            true
        } else if command && event.is("z") {
            self.undo();
            true
        } else if command && event.is("y") {
            self.redo();
            true
        } else {
            false
        }
    }

    /// Cursor for the pointer at a screen position.
    pub fn cursor_at(&self, screen: Point) -> CursorIcon {
        match self.interaction.gesture() {
            Gesture::Panning { .. } | Gesture::Moving { .. } | Gesture::Rotating { .. } => {
                return CursorIcon::Grabbing;
            }
            Gesture::Resizing { handle, original, .. } => return handle.cursor(original.rotation),
            Gesture::Drawing { .. } => return CursorIcon::Crosshair,
            Gesture::Idle => {}
        }
        if !self.tool.is_select() {
            return self.tool.cursor();
        }

        let world = self.viewport.screen_to_world(screen);
        let scene = self.history.current();
        if let Some(selected) = scene.selected_element() {
            let tolerance = self.viewport.screen_length_to_world(self.config.handle_tolerance);
            if let Some(handle) = selection::hit_handle(selected, world, tolerance, self.viewport.scale) {
                return handle.cursor(selected.rotation);
            }
        }
        let tolerance = self.viewport.screen_length_to_world(self.config.body_tolerance);
        if scene.element_at(world, tolerance).is_some() {
            CursorIcon::Grab
        } else {
            CursorIcon::Default
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Select(id) => {
                self.select(id.as_deref());
            }
            Action::Place(element) => {
                self.place(element);
            }
            Action::Delete(id) => {
                self.delete(&id);
            }
            Action::Commit(scene) => self.history.commit(scene),
        }
    }

    fn place(&mut self, element: Element) -> ElementId {
        let mut scene = self.history.current().clone();
        let id = scene.add(element);
        scene.select(&id);
        log::info!("Placed {} {}", scene.get(&id).map(|e| e.kind.as_str()).unwrap_or("element"), id);
        self.history.commit(scene);
        if !self.tool.is_sticky() {
            self.tool = ToolKind::Select;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, MIN_ELEMENT_SIZE};
    use crate::factory;
    use crate::input::{Modifiers, MouseButton};
    use kurbo::Vec2;

    /// Editor with scale 1 and no pan so screen and world coincide.
    fn editor() -> Editor {
        let mut editor = Editor::default();
        editor.viewport_mut().scale = 1.0;
        editor
    }

    fn down(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });
    }

    fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
        down(editor, from.0, from.1);
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(to.0, to.1),
        });
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(to.0, to.1),
            button: MouseButton::Left,
        });
    }

    fn key(editor: &mut Editor, name: &str, modifiers: Modifiers) -> bool {
        editor.handle_key_event(&KeyEvent::new(name, modifiers))
    }

    #[test]
    fn test_fresh_editor_has_nothing_to_undo() {
        let mut editor = editor();
        assert!(!editor.can_undo());
        assert!(!editor.undo());
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn test_draw_wall_commits_and_selects() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Wall));
        drag(&mut editor, (0.0, 0.0), (203.0, 2.0));

        assert_eq!(editor.scene().len(), 1);
        let wall = editor.selected_element().unwrap();
        let (a, b) = factory::centerline(wall);
        assert!(a.distance(Point::ZERO) < 1e-9);
        assert!(b.distance(Point::new(200.0, 0.0)) < 1e-9);
        assert_eq!(editor.history().len(), 2);
        // The wall tool stays active.
        assert_eq!(editor.tool(), ToolKind::Place(ElementKind::Wall));
    }

    #[test]
    fn test_placement_reverts_to_select() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Plant));
        down(&mut editor, 41.0, 39.0);
        assert_eq!(editor.tool(), ToolKind::Select);
        let plant = editor.selected_element().unwrap();
        assert_eq!(plant.center(), Point::new(40.0, 40.0));
        assert!(editor.can_undo());
    }

    #[test]
    fn test_move_is_one_undo_step() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Column));
        down(&mut editor, 100.0, 100.0);
        let id = editor.selected_element().unwrap().id.clone();
        let len = editor.history().len();

        down(&mut editor, 100.0, 100.0);
        for step in 1..=10 {
            editor.handle_pointer_event(PointerEvent::Move {
                position: Point::new(100.0 + step as f64 * 10.0, 100.0),
            });
            // Transient edits never reach the history.
            assert_eq!(editor.history().len(), len);
        }
        assert!(editor.scene().get(&id).unwrap().x > 150.0);
        assert_eq!(editor.committed_scene().get(&id).unwrap().x, 85.0);
        editor.handle_pointer_event(PointerEvent::Leave);

        assert_eq!(editor.history().len(), len + 1);
        assert!(editor.undo());
        assert_eq!(editor.scene().get(&id).unwrap().x, 85.0);
    }

    #[test]
    fn test_plain_click_does_not_create_history() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Column));
        down(&mut editor, 100.0, 100.0);
        editor.select(None);
        let len = editor.history().len();

        down(&mut editor, 100.0, 100.0);
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert_eq!(editor.history().len(), len);
        assert!(editor.selected_element().is_some());
    }

    #[test]
    fn test_panning_never_touches_history() {
        let mut editor = editor();
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Middle,
            modifiers: Modifiers::NONE,
        });
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(25.0, -5.0),
        });
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(25.0, -5.0),
            button: MouseButton::Middle,
        });
        assert_eq!(editor.viewport().offset, Vec2::new(25.0, -5.0));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_wheel_zoom() {
        let mut editor = editor();
        editor.handle_pointer_event(PointerEvent::Scroll {
            position: Point::new(100.0, 100.0),
            delta: Vec2::new(0.0, -500.0),
        });
        assert!((editor.viewport().scale - 1.5).abs() < 1e-12);
        let world = editor.viewport().screen_to_world(Point::new(100.0, 100.0));
        assert!((world.x - 100.0).abs() < 1e-9 && (world.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoomed_out_body_press_moves_instead_of_deleting() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Door));
        down(&mut editor, 200.0, 200.0);
        editor.viewport_mut().scale = 0.25;

        // The door's center at scale 0.25.
        down(&mut editor, 50.0, 50.0);
        assert!(matches!(editor.gesture(), Gesture::Moving { .. }));
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Left,
        });
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn test_zoomed_out_edge_press_resizes() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Bed));
        down(&mut editor, 200.0, 200.0);
        editor.viewport_mut().scale = 0.3;

        // North edge midpoint (200, 100) in world space.
        down(&mut editor, 60.0, 30.0);
        assert!(matches!(
            editor.gesture(),
            Gesture::Resizing {
                handle: selection::ResizeHandle::N,
                ..
            }
        ));
    }

    #[test]
    fn test_switching_tools_discards_gesture() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Column));
        down(&mut editor, 100.0, 100.0);
        let before = editor.committed_scene().clone();
        let len = editor.history().len();

        down(&mut editor, 100.0, 100.0);
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(300.0, 240.0),
        });
        assert!(!editor.scene().same_elements(&before));
        editor.select_tool(ToolKind::Place(ElementKind::Wall));
        assert_eq!(editor.gesture(), &Gesture::Idle);
        assert!(editor.scene().same_elements(&before));
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(300.0, 240.0),
            button: MouseButton::Left,
        });
        assert_eq!(editor.history().len(), len);
        assert!(editor.scene().same_elements(&before));

        // A wall being drawn is dropped the same way.
        down(&mut editor, 0.0, 0.0);
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(400.0, 0.0),
        });
        editor.select_tool(ToolKind::Select);
        assert!(editor.preview_wall().is_none());
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(400.0, 0.0),
            button: MouseButton::Left,
        });
        assert_eq!(editor.history().len(), len);
        assert!(editor.scene().same_elements(&before));
    }

    #[test]
    fn test_undo_redo_and_redo_tail() {
        let mut editor = editor();
        for i in 0..3 {
            editor.select_tool(ToolKind::Place(ElementKind::Lamp));
            down(&mut editor, i as f64 * 100.0, 0.0);
        }
        assert_eq!(editor.scene().len(), 3);

        assert!(key(&mut editor, "z", Modifiers::ctrl()));
        assert_eq!(editor.scene().len(), 2);
        assert!(key(&mut editor, "y", Modifiers::ctrl()));
        assert_eq!(editor.scene().len(), 3);
        editor.undo();
        editor.undo();
        assert!(editor.can_redo());

        editor.select_tool(ToolKind::Place(ElementKind::Vase));
        down(&mut editor, 500.0, 500.0);
        assert!(!editor.can_redo());
        assert_eq!(editor.scene().len(), 2);
    }

    #[test]
    fn test_ctrl_shift_z_redoes() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Lamp));
        down(&mut editor, 0.0, 0.0);
        editor.undo();
        let modifiers = Modifiers {
            shift: true,
            meta: true,
            ..Modifiers::NONE
        };
        assert!(key(&mut editor, "Z", modifiers));
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn test_escape_cancels_and_clears() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Bed));
        down(&mut editor, 200.0, 200.0);
        let original = editor.selected_element().unwrap().clone();

        down(&mut editor, 200.0, 200.0);
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(400.0, 400.0),
        });
        assert!(!editor.scene().get(&original.id).unwrap().same_geometry(&original));
        assert!(key(&mut editor, "Escape", Modifiers::NONE));

        assert_eq!(editor.gesture(), &Gesture::Idle);
        assert!(editor.selected_element().is_none());
        assert!(editor.scene().get(&original.id).unwrap().same_geometry(&original));

        editor.select_tool(ToolKind::Place(ElementKind::Wall));
        key(&mut editor, "Escape", Modifiers::NONE);
        assert_eq!(editor.tool(), ToolKind::Select);
    }

    #[test]
    fn test_delete_key_and_delete_handle() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Bed));
        down(&mut editor, 200.0, 200.0);
        assert!(key(&mut editor, "Delete", Modifiers::NONE));
        assert!(editor.scene().is_empty());
        assert!(editor.selected_element().is_none());
        assert!(!key(&mut editor, "Backspace", Modifiers::NONE));

        editor.undo();
        let bed = editor.selected_element().unwrap().clone();
        let delete_handle = selection::get_handles(&bed, editor.viewport().scale)
            .into_iter()
            .find(|h| h.kind == selection::HandleKind::Delete)
            .unwrap();
        down(&mut editor, delete_handle.position.x, delete_handle.position.y);
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn test_update_selected_properties() {
        let mut editor = editor();
        assert!(!editor.update_selected_properties(ElementPatch::default()));

        editor.select_tool(ToolKind::Place(ElementKind::Sofa));
        down(&mut editor, 0.0, 0.0);
        let len = editor.history().len();

        let patch = ElementPatch {
            width: Some(2.0),
            rotation: Some(45.0),
            height: Some(f64::NAN),
            ..ElementPatch::default()
        };
        assert!(editor.update_selected_properties(patch));
        let sofa = editor.selected_element().unwrap();
        assert_eq!(sofa.width, MIN_ELEMENT_SIZE);
        assert_eq!(sofa.height, 90.0);
        assert_eq!(sofa.rotation, 45.0);
        assert_eq!(editor.history().len(), len + 1);

        assert!(!editor.update_selected_properties(patch));
        assert_eq!(editor.history().len(), len + 1);
    }

    #[test]
    fn test_rotated_resize_through_editor() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Bed));
        down(&mut editor, 200.0, 200.0);
        editor.update_selected_properties(ElementPatch {
            rotation: Some(90.0),
            ..ElementPatch::default()
        });
        let bed = editor.selected_element().unwrap().clone();
        let before = bed.aabb();
        let east = selection::get_handles(&bed, editor.viewport().scale)
            .into_iter()
            .find(|h| h.kind == selection::HandleKind::Resize(selection::ResizeHandle::E))
            .unwrap()
            .position;

        drag(&mut editor, (east.x, east.y), (east.x, east.y + 50.0));
        let after = editor.selected_element().unwrap().aabb();
        assert!((after.height() - before.height() - 50.0).abs() < 1e-9);
        assert!((after.width() - before.width()).abs() < 1e-9);
    }

    #[test]
    fn test_generated_payload_rejected_leaves_scene() {
        let mut editor = Editor::new(factory::starter_scene(), EditorConfig::default(), EditorSettings::default());
        let before = editor.scene().clone();
        let result = editor.apply_generated_payload(
            r#"[{"id":"a","type":"unknown_kind","x":0,"y":0,"width":10,"height":10,"rotation":0}]"#,
        );
        assert!(result.is_err());
        assert_eq!(editor.scene(), &before);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_generated_payload_is_one_step() {
        let mut editor = Editor::new(factory::starter_scene(), EditorConfig::default(), EditorSettings::default());
        let count = editor
            .apply_generated_payload(
                r#"[{"id":"a","type":"sofa","x":0,"y":0,"width":220,"height":90,"rotation":0},
                    {"id":"b","type":"bed","x":300,"y":0,"width":160,"height":200,"rotation":90}]"#,
            )
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(editor.scene().len(), 2);
        editor.undo();
        assert_eq!(editor.scene().len(), 6);
    }

    #[test]
    fn test_generated_layout_discards_gesture() {
        let mut editor = editor();
        editor.select_tool(ToolKind::Place(ElementKind::Wall));
        down(&mut editor, 0.0, 0.0);
        editor.apply_generated_layout(vec![factory::create(ElementKind::Rug, Point::ZERO)]);
        assert_eq!(editor.gesture(), &Gesture::Idle);
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(300.0, 0.0),
            button: MouseButton::Left,
        });
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn test_snapping_toggle_and_settings() {
        let mut editor = editor();
        assert!(!editor.toggle_snapping());
        assert!(!editor.settings().snapping_enabled);
        editor.select_tool(ToolKind::Place(ElementKind::Plant));
        down(&mut editor, 41.0, 39.0);
        assert_eq!(editor.selected_element().unwrap().center(), Point::new(41.0, 39.0));

        assert!(!editor.toggle_grid());
        editor.update_settings(EditorSettings::default());
        assert!(editor.settings().grid_visible);
    }

    #[test]
    fn test_cursor_feedback() {
        let mut editor = editor();
        assert_eq!(editor.cursor_at(Point::new(10.0, 10.0)), CursorIcon::Default);
        editor.select_tool(ToolKind::Place(ElementKind::Bed));
        assert_eq!(editor.cursor_at(Point::new(10.0, 10.0)), CursorIcon::Crosshair);
        down(&mut editor, 100.0, 100.0);
        assert_eq!(editor.cursor_at(Point::new(100.0, 100.0)), CursorIcon::Grab);
        // East handle of the 160x200 bed centered on (100, 100).
        assert_eq!(editor.cursor_at(Point::new(180.0, 100.0)), CursorIcon::EwResize);

        down(&mut editor, 100.0, 100.0);
        assert_eq!(editor.cursor_at(Point::new(500.0, 500.0)), CursorIcon::Grabbing);
    }

    #[test]
    fn test_fit_to_content() {
        let mut editor = Editor::new(factory::starter_scene(), EditorConfig::default(), EditorSettings::default());
        editor.set_canvas_bounds(Point::ZERO, Size::new(1000.0, 800.0));
        editor.fit_to_content();
        let bounds = editor.scene().bounds().unwrap();
        let center = editor.viewport().world_to_screen(bounds.center());
        assert!((center.x - 500.0).abs() < 1e-9);
        assert!((center.y - 400.0).abs() < 1e-9);
    }
}
