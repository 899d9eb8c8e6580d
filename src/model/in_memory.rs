//! InMemoryModelStore - HashMap-backed document store.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Model, ModelStore, StoreError};

/// Internal stored representation of a document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct StoredModel {
    /// Insertion sequence; gives `find_models` a stable natural order.
    seq: u64,
    value: Value,
    unique: Vec<(String, String)>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(crate) struct Storage {
    next_seq: u64,
    records: HashMap<String, StoredModel>,
}

fn make_key(collection: &str, id: &str) -> String {
    format!("{}:{}", collection, id)
}

fn unique_of<M: Model>(model: &M) -> Vec<(String, String)> {
    model
        .unique_keys()
        .into_iter()
        .map(|(field, value)| (field.to_string(), value))
        .collect()
}

fn duplicate_key(collection: &str, field: &str, value: &str) -> StoreError {
    StoreError::DuplicateKey {
        collection: collection.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

impl Storage {
    /// Fail if any `unique` pair is already held by a stored record of the
    /// same collection whose key is not skipped.
    fn check_unique(
        &self,
        collection: &str,
        unique: &[(String, String)],
        skip: impl Fn(&str) -> bool,
    ) -> Result<(), StoreError> {
        if unique.is_empty() {
            return Ok(());
        }
        let prefix = format!("{}:", collection);
        for (other_key, stored) in self.records.iter() {
            if skip(other_key) || !other_key.starts_with(&prefix) {
                continue;
            }
            for (field, value) in unique {
                if stored.unique.iter().any(|(f, v)| f == field && v == value) {
                    return Err(duplicate_key(collection, field, value));
                }
            }
        }
        Ok(())
    }

    fn put(&mut self, key: String, value: Value, unique: Vec<(String, String)>) {
        let seq = match self.records.get(&key) {
            Some(existing) => existing.seq,
            None => {
                self.next_seq += 1;
                self.next_seq
            }
        };
        self.records.insert(key, StoredModel { seq, value, unique });
    }

    fn get<M: Model>(&self, id: &str) -> Result<Option<M>, StoreError> {
        match self.records.get(&make_key(M::COLLECTION, id)) {
            Some(stored) => Ok(Some(serde_json::from_value(stored.value.clone())?)),
            None => Ok(None),
        }
    }

    pub(crate) fn insert<M: Model>(&mut self, model: &M) -> Result<M, StoreError> {
        let key = make_key(M::COLLECTION, model.id());
        if self.records.contains_key(&key) {
            return Err(StoreError::DuplicateId {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            });
        }
        let unique = unique_of(model);
        self.check_unique(M::COLLECTION, &unique, |_| false)?;
        self.put(key, serde_json::to_value(model)?, unique);
        Ok(model.clone())
    }

    pub(crate) fn update<M: Model>(&mut self, model: &M) -> Result<M, StoreError> {
        let key = make_key(M::COLLECTION, model.id());
        if !self.records.contains_key(&key) {
            return Err(StoreError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            });
        }
        let unique = unique_of(model);
        self.check_unique(M::COLLECTION, &unique, |other| other == key)?;
        self.put(key, serde_json::to_value(model)?, unique);
        Ok(model.clone())
    }

    fn find<M: Model>(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<M>, StoreError> {
        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in self.records.iter() {
            if key.starts_with(&prefix) {
                let data: M = serde_json::from_value(stored.value.clone())?;
                if predicate(&data) {
                    results.push((stored.seq, data));
                }
            }
        }

        results.sort_by_key(|(seq, _)| *seq);
        Ok(results.into_iter().map(|(_, data)| data).collect())
    }

    /// Mutate every matching record. Either all changes apply or none do.
    pub(crate) fn update_many<M: Model>(
        &mut self,
        predicate: &dyn Fn(&M) -> bool,
        mutate: &dyn Fn(&mut M),
    ) -> Result<usize, StoreError> {
        let prefix = format!("{}:", M::COLLECTION);
        let mut changed = Vec::new();

        for (key, stored) in self.records.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let mut data: M = serde_json::from_value(stored.value.clone())?;
            if predicate(&data) {
                mutate(&mut data);
                changed.push((key.clone(), serde_json::to_value(&data)?, unique_of(&data)));
            }
        }

        let changed_keys: HashSet<&str> = changed.iter().map(|(key, _, _)| key.as_str()).collect();
        for (i, (_, _, unique)) in changed.iter().enumerate() {
            self.check_unique(M::COLLECTION, unique, |other| changed_keys.contains(other))?;
            for (_, _, later) in &changed[i + 1..] {
                if let Some((field, value)) = unique.iter().find(|pair| later.contains(pair)) {
                    return Err(duplicate_key(M::COLLECTION, field, value));
                }
            }
        }

        let count = changed.len();
        for (key, value, unique) in changed {
            self.put(key, value, unique);
        }
        Ok(count)
    }
}

/// In-memory document store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryModelStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_storage(storage: Storage) -> Self {
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    /// Apply `op` to a staged copy of the storage and swap it in only once
    /// `commit` accepts the result. Writers are serialized for the whole call.
    pub(crate) fn stage<T>(
        &self,
        op: impl FnOnce(&mut Storage) -> Result<T, StoreError>,
        commit: impl FnOnce(&Storage, &T) -> Result<(), StoreError>,
    ) -> Result<T, StoreError> {
        let mut storage = self.write()?;
        let mut staged = storage.clone();
        let result = op(&mut staged)?;
        commit(&staged, &result)?;
        *storage = staged;
        Ok(result)
    }
}

impl ModelStore for InMemoryModelStore {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<M>, StoreError> {
        self.read()?.get(id)
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<M, StoreError> {
        self.write()?.insert(model)
    }

    fn update_model<M: Model>(&self, model: &M) -> Result<M, StoreError> {
        self.write()?.update(model)
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<M>, StoreError> {
        self.read()?.find(predicate)
    }

    fn update_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
        mutate: &dyn Fn(&mut M),
    ) -> Result<usize, StoreError> {
        self.write()?.update_many(predicate, mutate)
    }
}
