//! Keyed locks used to serialize work on a single natural key.
//!
//! A [`LockManager`] hands out one lock per key; a [`LockGuard`] holds it
//! for the duration of a scope.

mod error;
mod in_memory;
mod lock;
mod lock_manager;

pub use error::LockError;
pub use in_memory::{InMemoryLockManager, KeyLock};
pub use lock::{Lock, LockGuard};
pub use lock_manager::LockManager;
