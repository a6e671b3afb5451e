//! Layout generator backed by a saved response file.

use plandraft_core::storage::BoxFuture;
use plandraft_core::{LayoutGenerator, PlanError, PlanResult};
use std::path::PathBuf;

/// Serves a generator response captured to disk, so layouts produced elsewhere
/// can be applied offline.
pub struct PayloadFileGenerator {
    path: PathBuf,
}

impl PayloadFileGenerator {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl LayoutGenerator for PayloadFileGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, PlanResult<String>> {
        Box::pin(async move {
            log::debug!("Layout prompt:\n{}", prompt);
            std::fs::read_to_string(&self.path).map_err(|e| {
                PlanError::Generator(format!("Failed to read {}: {}", self.path.display(), e))
            })
        })
    }
}
