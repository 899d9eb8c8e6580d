//! Store - The store handle opened from a connection string at startup.

use std::fmt;

use tracing::info;

use super::{FileModelStore, InMemoryModelStore, Model, ModelStore, StoreError};

/// A document store selected by connection string.
///
/// Supported schemes:
/// - `memory://`: process-local, lost on restart
/// - `file://<path>`: in-memory with a JSON snapshot at `<path>`
#[derive(Clone)]
pub enum Store {
    Memory(InMemoryModelStore),
    File(FileModelStore),
}

impl Store {
    /// Open a store from its connection string.
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let url = url.trim();
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| StoreError::Connect(format!("missing scheme in store url '{}'", url)))?;

        let store = match scheme {
            "memory" | "mem" => Store::Memory(InMemoryModelStore::new()),
            "file" => {
                if rest.is_empty() {
                    return Err(StoreError::Connect("file store url has no path".into()));
                }
                Store::File(FileModelStore::open(rest)?)
            }
            other => {
                return Err(StoreError::Connect(format!(
                    "unsupported store scheme '{}'",
                    other
                )))
            }
        };

        info!(store = %store, "store connected");
        Ok(store)
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Store::Memory(_) => write!(f, "memory://"),
            Store::File(store) => write!(f, "file://{}", store.path().display()),
        }
    }
}

impl ModelStore for Store {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<M>, StoreError> {
        match self {
            Store::Memory(s) => s.get_model(id),
            Store::File(s) => s.get_model(id),
        }
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<M, StoreError> {
        match self {
            Store::Memory(s) => s.insert_model(model),
            Store::File(s) => s.insert_model(model),
        }
    }

    fn update_model<M: Model>(&self, model: &M) -> Result<M, StoreError> {
        match self {
            Store::Memory(s) => s.update_model(model),
            Store::File(s) => s.update_model(model),
        }
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<M>, StoreError> {
        match self {
            Store::Memory(s) => s.find_models(predicate),
            Store::File(s) => s.find_models(predicate),
        }
    }

    fn update_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
        mutate: &dyn Fn(&mut M),
    ) -> Result<usize, StoreError> {
        match self {
            Store::Memory(s) => s.update_models(predicate, mutate),
            Store::File(s) => s.update_models(predicate, mutate),
        }
    }
}
