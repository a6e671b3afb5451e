//! Plan persistence, keyed per project.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::factory;
use crate::scene::Scene;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Plan not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Storage key for a project's plan.
pub fn plan_key(project_id: &str) -> String {
    format!("project_{}_plan", project_id)
}

/// Inverse of [`plan_key`].
pub fn project_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix("project_")?.strip_suffix("_plan")
}

/// Trait for plan storage backends.
///
/// A stored plan is the ordered list of element records; selection and view
/// state are not persisted.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlanStorage: Send + Sync {
    /// Save a project's plan.
    fn save(&self, project_id: &str, scene: &Scene) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a project's plan.
    fn load(&self, project_id: &str) -> BoxFuture<'_, StorageResult<Scene>>;

    /// Delete a project's plan.
    fn delete(&self, project_id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List the ids of all projects with a stored plan.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a project has a stored plan.
    fn exists(&self, project_id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for plan storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait PlanStorage {
    fn save(&self, project_id: &str, scene: &Scene) -> BoxFuture<'_, StorageResult<()>>;
    fn load(&self, project_id: &str) -> BoxFuture<'_, StorageResult<Scene>>;
    fn delete(&self, project_id: &str) -> BoxFuture<'_, StorageResult<()>>;
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;
    fn exists(&self, project_id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Load a project's plan, falling back to the starter plan when nothing is
/// stored or the stored value cannot be parsed. Other failures propagate.
pub async fn load_or_starter<S>(storage: &S, project_id: &str) -> StorageResult<Scene>
where
    S: PlanStorage + ?Sized,
{
    match storage.load(project_id).await {
        Ok(scene) => {
            log::info!("Loaded plan for project {} ({} elements)", project_id, scene.len());
            Ok(scene)
        }
        Err(StorageError::NotFound(_)) => {
            log::info!("No stored plan for project {}, using starter plan", project_id);
            Ok(factory::starter_scene())
        }
        Err(StorageError::Serialization(e)) => {
            log::warn!("Stored plan for project {} is unreadable ({}), using starter plan", project_id, e);
            Ok(factory::starter_scene())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
pub(crate) fn block_on<F: std::future::Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
