//! Client registry: one client record per license plate.

mod client;
mod registry;

pub use client::{Client, ClientFields, NewClient, MAX_CAR_MODEL_LEN};
pub use registry::ClientRegistry;
