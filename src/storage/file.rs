use super::KeyValueStore;
use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Key-value store persisted as a flat JSON object on disk.
///
/// The file is re-read on every access so that writes made by another
/// process are picked up. Writers in the same process are serialized;
/// writers in different processes are not. A file that does not parse
/// reads as empty and is replaced by the next write or removal.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

struct Snapshot {
    entries: BTreeMap<String, String>,
    corrupt: bool,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Snapshot, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot { entries: BTreeMap::new(), corrupt: false }),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Snapshot { entries: BTreeMap::new(), corrupt: false });
        }

        match serde_json::from_slice(&bytes) {
            Ok(entries) => Ok(Snapshot { entries, corrupt: false }),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file is corrupt, reading it as empty");
                Ok(Snapshot { entries: BTreeMap::new(), corrupt: true })
            }
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all().await?.entries.remove(key))
    }

    #[tracing::instrument(err, skip(self, value), fields(path = %self.path.display()))]
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.read_all().await?;
        snapshot.entries.insert(key.to_string(), value.to_string());
        self.write_all(&snapshot.entries).await
    }

    #[tracing::instrument(err, skip(self), fields(path = %self.path.display()))]
    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.read_all().await?;
        if snapshot.entries.remove(key).is_some() || snapshot.corrupt {
            self.write_all(&snapshot.entries).await?;
        }
        Ok(())
    }
}
