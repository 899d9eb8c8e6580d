use std::sync::Arc;

use super::{Lock, LockError};

/// Factory trait for obtaining per-key locks.
///
/// The wash queue asks for one lock per plate so that the pending-wash check
/// and the insert that follows it cannot interleave with another
/// registration for the same plate.
pub trait LockManager: Send + Sync {
    /// The concrete lock type returned by this manager.
    type Lock: Lock;

    /// Get (or create) the lock for `key`.
    ///
    /// While any caller still holds an `Arc` from a previous call, the same
    /// lock must be returned.
    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;

    /// Give back a lock obtained from `get_lock`. The manager may forget
    /// `key` once nobody else holds its lock.
    fn release(&self, key: &str, lock: Arc<Self::Lock>);
}
