//! Car-wash queue backend.
//!
//! - [`clients`] keeps one client per license plate.
//! - [`washes`] registers washes, guards against duplicate pending washes,
//!   and lists the swept, joined and sorted service queue.
//! - [`model`] is the document store both of them run on.
//! - [`http`] exposes everything as a JSON API (feature `http`).

pub mod clients;
pub mod config;
pub mod error;
pub mod lock;
pub mod logging;
pub mod model;
pub mod washes;

#[cfg(feature = "http")]
pub mod http;

pub use clients::{Client, ClientFields, ClientRegistry, NewClient};
pub use error::QueueError;
pub use model::{InMemoryModelStore, Model, ModelStore, ModelsExt, Store, StoreError};
pub use washes::{QueueEntry, QueueFilter, Registration, ServiceRequest, Wash, WashQueue, WashStatus};
