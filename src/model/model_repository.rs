//! ModelRepository - Typed accessor for document CRUD operations.

use std::marker::PhantomData;

use super::{Model, ModelStore, StoreError};

/// Typed repository wrapper for accessing documents of a specific type.
pub struct ModelRepository<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: ModelStore, M: Model> ModelRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a document by ID.
    pub fn get(&self, id: &str) -> Result<Option<M>, StoreError> {
        self.store.get_model(id)
    }

    /// Insert a new document. Fails if it already exists.
    pub fn insert(&self, model: &M) -> Result<M, StoreError> {
        self.store.insert_model(model)
    }

    /// Replace an existing document.
    pub fn update(&self, model: &M) -> Result<M, StoreError> {
        self.store.update_model(model)
    }

    /// Find documents matching a predicate.
    pub fn find(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<M>, StoreError> {
        self.store.find_models(predicate)
    }

    /// Find the first document matching a predicate.
    pub fn find_one(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Option<M>, StoreError> {
        self.store.find_one(predicate)
    }

    /// Mutate every document matching a predicate.
    pub fn update_where(
        &self,
        predicate: &dyn Fn(&M) -> bool,
        mutate: &dyn Fn(&mut M),
    ) -> Result<usize, StoreError> {
        self.store.update_models(predicate, mutate)
    }
}

/// Extension trait for typed document access on any ModelStore.
pub trait ModelsExt: ModelStore + Sized {
    /// Get a typed model repository.
    fn models<M: Model>(&self) -> ModelRepository<'_, Self, M> {
        ModelRepository::new(self)
    }
}

impl<S: ModelStore> ModelsExt for S {}
