use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use tracing::warn;

use super::{Lock, LockError, LockManager};

fn poisoned<T>(e: PoisonError<T>) -> LockError {
    LockError::Poisoned(e.to_string())
}

/// Lock for a single key: a held flag plus a condvar for waiters.
#[derive(Default)]
pub struct KeyLock {
    held: Mutex<bool>,
    released: Condvar,
}

impl Lock for KeyLock {
    fn lock(&self) -> Result<(), LockError> {
        let held = self.held.lock().map_err(poisoned)?;
        let mut held = self
            .released
            .wait_while(held, |held| *held)
            .map_err(poisoned)?;
        *held = true;
        Ok(())
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut held = self.held.lock().map_err(poisoned)?;
        *held = false;
        self.released.notify_one();
        Ok(())
    }
}

/// Hands out one [`KeyLock`] per key, such as a licence plate.
///
/// A key is tracked only while some caller holds or waits on its lock. The
/// entry goes away when the last of them releases it, so the map stays as
/// small as the set of plates currently being registered.
#[derive(Default)]
pub struct InMemoryLockManager {
    locks: Mutex<HashMap<String, Arc<KeyLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with a live lock.
    pub fn tracked_keys(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl LockManager for InMemoryLockManager {
    type Lock = KeyLock;

    fn get_lock(&self, key: &str) -> Result<Arc<KeyLock>, LockError> {
        let mut locks = self.locks.lock().map_err(poisoned)?;
        Ok(locks.entry(key.to_string()).or_default().clone())
    }

    fn release(&self, key: &str, lock: Arc<KeyLock>) {
        let mut locks = match self.locks.lock() {
            Ok(locks) => locks,
            Err(e) => {
                warn!(key, error = %e, "lock map poisoned, key not released");
                return;
            }
        };
        drop(lock);
        // Clones are only handed out under the map mutex, so a count of one
        // means no guard holds or waits on this key.
        if locks.get(key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(key);
        }
    }
}
