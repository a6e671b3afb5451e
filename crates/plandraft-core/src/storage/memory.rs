//! Plans held in process memory.

use super::{BoxFuture, PlanStorage, StorageError, StorageResult, plan_key, project_id_from_key};
use crate::scene::Scene;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Key-value plan store for tests and hosts without a filesystem.
///
/// Values are the serialized JSON text under `project_<id>_plan`, so a corrupt
/// entry behaves like a corrupt file.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .read()
            .map_err(|_| StorageError::Other("plan store lock poisoned".to_string()))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .write()
            .map_err(|_| StorageError::Other("plan store lock poisoned".to_string()))
    }

    /// Store text as-is under a project's key, as another writer might have.
    pub fn insert_raw(&self, project_id: &str, raw: &str) -> StorageResult<()> {
        self.write()?.insert(plan_key(project_id), raw.to_string());
        Ok(())
    }
}

impl PlanStorage for MemoryStorage {
    fn save(&self, project_id: &str, scene: &Scene) -> BoxFuture<'_, StorageResult<()>> {
        let key = plan_key(project_id);
        let json = scene.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            self.write()?.insert(key, json);
            Ok(())
        })
    }

    fn load(&self, project_id: &str) -> BoxFuture<'_, StorageResult<Scene>> {
        let key = plan_key(project_id);
        let project_id = project_id.to_string();
        Box::pin(async move {
            let entries = self.read()?;
            let json = entries.get(&key).ok_or(StorageError::NotFound(project_id))?;
            Scene::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))
        })
    }

    fn delete(&self, project_id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = plan_key(project_id);
        Box::pin(async move {
            self.write()?.remove(&key);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            Ok(self
                .read()?
                .keys()
                .filter_map(|key| project_id_from_key(key))
                .map(str::to_string)
                .collect())
        })
    }

    fn exists(&self, project_id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = plan_key(project_id);
        Box::pin(async move { Ok(self.read()?.contains_key(&key)) })
    }
}
