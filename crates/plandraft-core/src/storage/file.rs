//! Plans as JSON files, one per project.

use super::{BoxFuture, PlanStorage, StorageError, StorageResult, plan_key, project_id_from_key};
use crate::scene::Scene;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

fn io_error(action: &str, path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Directory of `project_<id>_plan.json` files.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a plan directory.
    pub fn new(dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&dir).map_err(|e| io_error("create", &dir, e))?;
        Ok(Self { dir })
    }

    /// `<local data dir>/plandraft/plans`, e.g. `~/.local/share/plandraft/plans` on Linux.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine a data directory".to_string()))?;
        Self::new(base.join("plandraft").join("plans"))
    }

    pub fn base_path(&self) -> &Path {
        &self.dir
    }

    /// Project ids become file names, so anything outside `[A-Za-z0-9_-]` is replaced.
    fn plan_path(&self, project_id: &str) -> PathBuf {
        let safe_id: String = project_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(plan_key(&safe_id)).with_extension("json")
    }
}

impl PlanStorage for FileStorage {
    /// Writes to a sibling temp file first so a crash never leaves half a plan.
    fn save(&self, project_id: &str, scene: &Scene) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.plan_path(project_id);
        let json = scene.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            let staging = path.with_extension("json.tmp");
            fs::write(&staging, json).map_err(|e| io_error("write", &staging, e))?;
            fs::rename(&staging, &path).map_err(|e| io_error("replace", &path, e))?;
            log::info!("Saved plan to {}", path.display());
            Ok(())
        })
    }

    fn load(&self, project_id: &str) -> BoxFuture<'_, StorageResult<Scene>> {
        let path = self.plan_path(project_id);
        let project_id = project_id.to_string();
        Box::pin(async move {
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound(project_id)),
                Err(e) => return Err(io_error("read", &path, e)),
            };
            Scene::from_json(&json)
                .map_err(|e| StorageError::Serialization(format!("{}: {}", path.display(), e)))
        })
    }

    fn delete(&self, project_id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.plan_path(project_id);
        Box::pin(async move {
            match fs::remove_file(&path) {
                Ok(()) => {
                    log::info!("Removed {}", path.display());
                    Ok(())
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(io_error("remove", &path, e)),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries = fs::read_dir(&self.dir).map_err(|e| io_error("list", &self.dir, e))?;
            let mut ids: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|path| {
                    let stem = path.file_stem()?.to_str()?;
                    project_id_from_key(stem).map(str::to_string)
                })
                .collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, project_id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.plan_path(project_id);
        Box::pin(async move { Ok(path.is_file()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind};
    use crate::storage::{block_on, load_or_starter};
    use tempfile::tempdir;

    fn plan() -> Scene {
        let mut scene = Scene::new();
        scene.add(Element::new(ElementKind::Stair, 40.0, 40.0, 100.0, 220.0).with_rotation(-15.0));
        scene
    }

    #[test]
    fn test_plan_file_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let scene = plan();

        block_on(storage.save("12", &scene)).unwrap();
        assert!(dir.path().join("project_12_plan.json").exists());
        assert!(!dir.path().join("project_12_plan.json.tmp").exists());
        let loaded = block_on(storage.load("12")).unwrap();

        assert!(loaded.same_elements(&scene));
    }

    #[test]
    fn test_missing_plan_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert!(matches!(block_on(storage.load("nonexistent")), Err(StorageError::NotFound(_))));
        assert!(!block_on(storage.exists("nonexistent")).unwrap());
        block_on(storage.delete("nonexistent")).unwrap();
    }

    #[test]
    fn test_list_skips_foreign_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("settings.json"), "{}").unwrap();

        block_on(storage.save("b", &plan())).unwrap();
        block_on(storage.save("a", &plan())).unwrap();
        assert_eq!(block_on(storage.list()).unwrap(), vec!["a".to_string(), "b".to_string()]);

        block_on(storage.delete("a")).unwrap();
        assert!(!block_on(storage.exists("a")).unwrap());
        assert_eq!(block_on(storage.list()).unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_project_id_cannot_escape_directory() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("plans")).unwrap();
        let scene = plan();

        block_on(storage.save("../escape/me", &scene)).unwrap();
        let loaded = block_on(storage.load("../escape/me")).unwrap();
        assert!(loaded.same_elements(&scene));
        assert!(!dir.path().join("escape").exists());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_starter() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("project_9_plan.json"), "[{\"id\": 3}").unwrap();

        assert!(matches!(
            block_on(storage.load("9")),
            Err(StorageError::Serialization(_))
        ));
        let scene = block_on(load_or_starter(&storage, "9")).unwrap();
        assert_eq!(scene.len(), 6);
    }
}
