use super::BlobStore;
use crate::error::{MarknotesError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(MarknotesError::Io)?;
        }
        Ok(())
    }
}

impl BlobStore for FileStore {
    fn load_blob(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(MarknotesError::Io)?;
        Ok(Some(content))
    }

    fn save_blob(&mut self, key: &str, data: &str) -> Result<()> {
        self.ensure_dir()?;

        let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, data).map_err(MarknotesError::Io)?;
        fs::rename(&tmp_file, self.blob_path(key)).map_err(MarknotesError::Io)?;

        log::debug!("saved blob '{}' ({} bytes)", key, data.len());
        Ok(())
    }

    fn remove_blob(&mut self, key: &str) -> Result<()> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(MarknotesError::Io)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_blob_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert_eq!(store.load_blob("nothing").unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        store.save_blob("state", "{\"a\":1}").unwrap();
        assert_eq!(
            store.load_blob("state").unwrap(),
            Some("{\"a\":1}".to_string())
        );
        assert!(dir.path().join("nested").join("state.json").exists());
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.save_blob("state", "one").unwrap();
        store.save_blob("state", "two").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["state.json".to_string()]);
        assert_eq!(store.load_blob("state").unwrap(), Some("two".to_string()));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.save_blob("theme", "dark").unwrap();
        store.remove_blob("theme").unwrap();
        store.remove_blob("theme").unwrap();
        assert_eq!(store.load_blob("theme").unwrap(), None);
    }
}
