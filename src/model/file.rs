//! FileModelStore - In-memory store persisted to a JSON snapshot file.
//!
//! Every successful write rewrites the snapshot (via a temp file + rename),
//! and opening the store loads the last snapshot if one exists.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::in_memory::Storage;
use super::{InMemoryModelStore, Model, ModelStore, StoreError};

/// Document store that keeps data in memory and mirrors it to disk.
///
/// A write is applied to a staged copy first. The copy replaces the live
/// data only after its snapshot has been written, so memory never holds a
/// change the file does not.
#[derive(Clone)]
pub struct FileModelStore {
    inner: InMemoryModelStore,
    path: Arc<PathBuf>,
}

impl FileModelStore {
    /// Open the store at `path`, loading an existing snapshot.
    ///
    /// A missing file starts an empty store; an unreadable or corrupt file
    /// fails with `StoreError::Connect`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let storage = if path.exists() {
            let bytes = fs::read(&path)
                .map_err(|e| StoreError::Connect(format!("{}: {}", path.display(), e)))?;
            if bytes.is_empty() {
                Storage::default()
            } else {
                serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Connect(format!("{}: {}", path.display(), e)))?
            }
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Connect(format!("{}: {}", parent.display(), e)))?;
            }
            Storage::default()
        };

        Ok(Self {
            inner: InMemoryModelStore::from_storage(storage),
            path: Arc::new(path),
        })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, storage: &Storage) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(storage)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).map_err(|e| StoreError::Storage(e.to_string()))?;
        fs::rename(&tmp, self.path.as_path()).map_err(|e| StoreError::Storage(e.to_string()))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "store snapshot written");
        Ok(())
    }
}

impl ModelStore for FileModelStore {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<M>, StoreError> {
        self.inner.get_model(id)
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<M, StoreError> {
        self.inner
            .stage(|storage| storage.insert(model), |staged, _| self.persist(staged))
    }

    fn update_model<M: Model>(&self, model: &M) -> Result<M, StoreError> {
        self.inner
            .stage(|storage| storage.update(model), |staged, _| self.persist(staged))
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<M>, StoreError> {
        self.inner.find_models(predicate)
    }

    fn update_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
        mutate: &dyn Fn(&mut M),
    ) -> Result<usize, StoreError> {
        self.inner.stage(
            |storage| storage.update_many(predicate, mutate),
            |staged, count| match *count {
                0 => Ok(()),
                _ => self.persist(staged),
            },
        )
    }
}
