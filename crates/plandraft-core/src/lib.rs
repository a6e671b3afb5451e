//! PlanDraft Core Library
//!
//! Platform-agnostic data structures and editing logic for the PlanDraft
//! floor-plan editor: the element model, the view transform, snapping, the
//! pointer gesture machine, undo history and plan persistence.

pub mod catalog;
pub mod editor;
pub mod element;
pub mod error;
pub mod factory;
pub mod generator;
pub mod history;
pub mod input;
pub mod interaction;
pub mod scene;
pub mod selection;
pub mod settings;
pub mod snap;
pub mod storage;
pub mod tools;
pub mod viewport;

pub use catalog::{ElementSpec, Placement, WALL_THICKNESS};
pub use editor::{Editor, ElementPatch};
pub use element::{Element, ElementId, ElementKind, MIN_ELEMENT_SIZE};
pub use error::{PlanError, PlanResult};
pub use generator::{ElementDescriptor, LayoutGenerator, generate_layout};
pub use history::History;
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use interaction::{Action, Gesture};
pub use scene::Scene;
pub use selection::{CursorIcon, Handle, HandleKind, ResizeHandle};
pub use settings::{EditorConfig, EditorSettings};
pub use snap::{GRID_SIZE, SnapEngine, SnapResult, SnapTarget, snap_to_grid};
pub use storage::{PlanStorage, StorageError};
pub use tools::ToolKind;
pub use viewport::Viewport;
