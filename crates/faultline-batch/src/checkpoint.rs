//! Checkpoint stores and report files

use crate::error::BatchError;
use async_trait::async_trait;
use faultline_domain::{BatchReport, CheckpointKey, CheckpointStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Stores each checkpoint as a pretty-printed JSON file named `<key>.json`
///
/// Files are written to a temporary name and renamed into place, so a
/// crash mid-write never leaves a truncated checkpoint behind.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the checkpoint files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the checkpoint for `key`
    pub fn path_for(&self, key: &CheckpointKey) -> Result<PathBuf, BatchError> {
        let name = key.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(BatchError::Checkpoint(format!(
                "'{}' is not a valid checkpoint key",
                name
            )));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    type Error = BatchError;

    async fn save(&self, key: &CheckpointKey, report: &BatchReport) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));
        let json = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        debug!("Wrote checkpoint {}", path.display());
        Ok(())
    }

    async fn load(&self, key: &CheckpointKey) -> Result<Option<BatchReport>, Self::Error> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps checkpoints in process memory
///
/// Clones share the same entries, so a test can hand one clone to a runner
/// and inspect what was saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryCheckpointStore {
    entries: Arc<Mutex<BTreeMap<CheckpointKey, BatchReport>>>,
}

impl MemoryCheckpointStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys saved so far, in sorted order
    pub fn keys(&self) -> Vec<CheckpointKey> {
        self.lock().keys().cloned().collect()
    }

    /// Number of stored checkpoints
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been saved
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<CheckpointKey, BatchReport>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    type Error = BatchError;

    async fn save(&self, key: &CheckpointKey, report: &BatchReport) -> Result<(), Self::Error> {
        self.lock().insert(key.clone(), report.clone());
        Ok(())
    }

    async fn load(&self, key: &CheckpointKey) -> Result<Option<BatchReport>, Self::Error> {
        Ok(self.lock().get(key).cloned())
    }
}

/// Write a batch report as pretty-printed JSON
pub async fn write_report(path: impl AsRef<Path>, report: &BatchReport) -> Result<(), BatchError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, serde_json::to_vec_pretty(report)?).await?;
    info!(
        "Wrote report to {} ({} results)",
        path.display(),
        report.results.len()
    );
    Ok(())
}

/// Read a batch report written by [`write_report`] or a checkpoint store
pub async fn read_report(path: impl AsRef<Path>) -> Result<BatchReport, BatchError> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
