use std::sync::Arc;

use tracing::warn;

use super::{LockError, LockManager};

/// Trait for a single lock instance.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Release the lock.
    fn unlock(&self) -> Result<(), LockError>;
}

/// Holds the lock for one key until dropped, then hands it back to the
/// manager it came from.
pub struct LockGuard<'a, M: LockManager> {
    manager: &'a M,
    key: String,
    lock: Option<Arc<M::Lock>>,
}

impl<'a, M: LockManager> LockGuard<'a, M> {
    /// Block until the lock for `key` is acquired.
    pub fn acquire(manager: &'a M, key: &str) -> Result<Self, LockError> {
        let lock = manager.get_lock(key)?;
        if let Err(e) = lock.lock() {
            manager.release(key, lock);
            return Err(e);
        }
        Ok(Self {
            manager,
            key: key.to_string(),
            lock: Some(lock),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<M: LockManager> Drop for LockGuard<'_, M> {
    fn drop(&mut self) {
        if let Some(lock) = self.lock.take() {
            if let Err(e) = lock.unlock() {
                warn!(key = %self.key, error = %e, "failed to release lock");
            }
            self.manager.release(&self.key, lock);
        }
    }
}
