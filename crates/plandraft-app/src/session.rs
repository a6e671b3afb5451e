//! An editing session on one project's plan.

use crate::AppError;
use plandraft_core::storage::load_or_starter;
use plandraft_core::{Editor, EditorConfig, EditorSettings, PlanStorage};

/// Editor bound to a project id in a storage backend.
pub struct Session<'s, S: PlanStorage + ?Sized> {
    storage: &'s S,
    project_id: String,
    pub editor: Editor,
}

impl<'s, S: PlanStorage + ?Sized> Session<'s, S> {
    /// Load the project's plan (or the starter plan) into a fresh editor.
    pub fn open(
        storage: &'s S,
        project_id: &str,
        config: EditorConfig,
        settings: EditorSettings,
    ) -> Result<Self, AppError> {
        let scene = pollster::block_on(load_or_starter(storage, project_id))?;
        Ok(Self {
            storage,
            project_id: project_id.to_string(),
            editor: Editor::new(scene, config, settings),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Persist the committed plan. A gesture still in progress is not saved.
    pub fn save(&self) -> Result<(), AppError> {
        pollster::block_on(
            self.storage
                .save(&self.project_id, self.editor.committed_scene()),
        )?;
        Ok(())
    }
}
