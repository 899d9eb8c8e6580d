//! Models - Document-store abstraction for clients and wash records.
//!
//! Models provide a simple CRUD abstraction over typed documents grouped in
//! collections. The queue logic only ever talks to a [`ModelStore`]; the
//! concrete backend is chosen at startup from a connection string.
//!
//! ## Example
//!
//! ```ignore
//! use carwash_queue::model::{Model, InMemoryModelStore, ModelsExt};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct Note {
//!     pub id: String,
//!     pub text: String,
//! }
//!
//! impl Model for Note {
//!     const COLLECTION: &'static str = "notes";
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! let store = InMemoryModelStore::new();
//! store.models::<Note>().insert(&note)?;
//! let loaded = store.models::<Note>().get("note-1")?;
//! ```

mod connect;
mod file;
mod in_memory;
mod model_repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be stored as documents.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this model type (e.g. "clients", "washes").
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> &str;

    /// Fields that must be unique across the collection, as `(field, value)`
    /// pairs. Writes that would duplicate one of these on another document
    /// fail with [`StoreError::DuplicateKey`].
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A document with this id already exists.
    #[error("duplicate id in {collection}: {id}")]
    DuplicateId { collection: String, id: String },

    /// A unique field value is already taken by another document.
    #[error("duplicate {field} in {collection}: {value}")]
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },

    /// Document not found.
    #[error("document not found: {collection}:{id}")]
    NotFound { collection: String, id: String },

    /// Serialization/deserialization error.
    #[error("document serialization error: {0}")]
    Serde(String),

    /// Storage-level error (poisoned lock, I/O).
    #[error("storage error: {0}")]
    Storage(String),

    /// The store could not be opened from its connection string.
    #[error("store connection failed: {0}")]
    Connect(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

pub use connect::Store;
pub use file::FileModelStore;
pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
