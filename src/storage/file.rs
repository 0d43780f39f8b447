use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::{Result, StoreError};
use crate::storage::KeyValueStore;

/// File-backed store: one `<key>.json` file per key under a data directory.
///
/// Writes go through a temp file and a rename, so a crash mid-write leaves
/// the previous snapshot intact.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("Failed to read '{}': {e}", path.display()))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io(format!("Failed to create data directory: {e}")))?;
        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)
            .await
            .map_err(|e| StoreError::Io(format!("Failed to write '{}': {e}", temp_path.display())))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StoreError::Io(format!("Failed to rename '{}': {e}", temp_path.display())))?;
        Ok(())
    }
}
