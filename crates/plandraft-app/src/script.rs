//! Recorded host input and its replay through the editor.
//!
//! A script is a JSON array of events as a host would report them: pointer
//! and wheel input in canvas pixels, key presses, and toolbar commands.

use kurbo::{Point, Size, Vec2};
use plandraft_core::{
    Editor, ElementPatch, KeyEvent, Modifiers, MouseButton, PointerEvent, ToolKind,
};
use serde::{Deserialize, Serialize};

fn left() -> MouseButton {
    MouseButton::Left
}

/// One recorded host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "left")]
        button: MouseButton,
        #[serde(default)]
        shift: bool,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default = "left")]
        button: MouseButton,
    },
    PointerLeave,
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    SelectTool {
        tool: ToolKind,
    },
    DeleteSelected,
    UpdateSelected {
        #[serde(default)]
        patch: ElementPatch,
    },
    Undo,
    Redo,
    ToggleGrid,
    ToggleSnapping,
    ZoomIn,
    ZoomOut,
    FitToContent,
    /// Canvas resized, in pixels.
    Resize {
        width: f64,
        height: f64,
    },
}

impl HostEvent {
    /// The core pointer event this maps to, if it is pointer input.
    fn pointer_event(&self) -> Option<PointerEvent> {
        let event = match *self {
            HostEvent::PointerDown { x, y, button, shift } => PointerEvent::Down {
                position: Point::new(x, y),
                button,
                modifiers: Modifiers {
                    shift,
                    ..Modifiers::NONE
                },
            },
            HostEvent::PointerMove { x, y } => PointerEvent::Move {
                position: Point::new(x, y),
            },
            HostEvent::PointerUp { x, y, button } => PointerEvent::Up {
                position: Point::new(x, y),
                button,
            },
            HostEvent::PointerLeave => PointerEvent::Leave,
            HostEvent::Wheel { x, y, delta_y } => PointerEvent::Scroll {
                position: Point::new(x, y),
                delta: Vec2::new(0.0, delta_y),
            },
            _ => return None,
        };
        Some(event)
    }
}

/// Parse a script file's contents.
pub fn parse_script(json: &str) -> Result<Vec<HostEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Counts from a replay, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub events: usize,
    /// Key presses that matched no binding.
    pub ignored_keys: usize,
}

/// Feed one event to the editor.
///
/// Returns false for a key press with no binding.
pub fn apply_event(editor: &mut Editor, event: &HostEvent) -> bool {
    if let Some(pointer) = event.pointer_event() {
        editor.handle_pointer_event(pointer);
        return true;
    }

    match event {
        HostEvent::Key { key, modifiers } => {
            return editor.handle_key_event(&KeyEvent::new(key.clone(), *modifiers));
        }
        HostEvent::SelectTool { tool } => editor.select_tool(*tool),
        HostEvent::DeleteSelected => {
            editor.delete_selected();
        }
        HostEvent::UpdateSelected { patch } => {
            editor.update_selected_properties(*patch);
        }
        HostEvent::Undo => {
            editor.undo();
        }
        HostEvent::Redo => {
            editor.redo();
        }
        HostEvent::ToggleGrid => {
            editor.toggle_grid();
        }
        HostEvent::ToggleSnapping => {
            editor.toggle_snapping();
        }
        HostEvent::ZoomIn => editor.zoom_in(),
        HostEvent::ZoomOut => editor.zoom_out(),
        HostEvent::FitToContent => editor.fit_to_content(),
        HostEvent::Resize { width, height } => {
            editor.set_canvas_bounds(Point::ZERO, Size::new(*width, *height));
        }
        _ => {}
    }
    true
}

/// Replay a whole script.
pub fn replay(editor: &mut Editor, events: &[HostEvent]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for event in events {
        report.events += 1;
        if !apply_event(editor, event) {
            log::debug!("Unbound key in script: {:?}", event);
            report.ignored_keys += 1;
        }
    }
    log::info!(
        "Replayed {} events, scene has {} elements",
        report.events,
        editor.scene().len()
    );
    report
}
