//! ModelStore - Abstract CRUD storage for documents.

use super::{Model, StoreError};

/// Abstract CRUD storage for documents.
///
/// Results of `find_models` come back in insertion order.
pub trait ModelStore: Send + Sync {
    /// Get a document by ID. Returns None if not found.
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<M>, StoreError>;

    /// Insert a new document. Fails if the id or a unique key is taken.
    fn insert_model<M: Model>(&self, model: &M) -> Result<M, StoreError>;

    /// Replace an existing document. Fails with `NotFound` if absent.
    fn update_model<M: Model>(&self, model: &M) -> Result<M, StoreError>;

    /// Find documents matching a predicate.
    fn find_models<M: Model>(&self, predicate: &dyn Fn(&M) -> bool)
        -> Result<Vec<M>, StoreError>;

    /// Apply `mutate` to every document matching `predicate` in a single
    /// write. Returns how many documents were changed. Unique keys are
    /// checked across the whole batch; on conflict nothing changes.
    fn update_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
        mutate: &dyn Fn(&mut M),
    ) -> Result<usize, StoreError>;

    /// Find the first document matching a predicate.
    fn find_one<M: Model>(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Option<M>, StoreError> {
        Ok(self.find_models(predicate)?.into_iter().next())
    }
}
