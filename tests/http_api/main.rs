//! HTTP API integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

#[cfg(feature = "http")]
mod support;
#[cfg(feature = "http")]
mod services;
