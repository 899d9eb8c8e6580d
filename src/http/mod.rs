//! HTTP transport: maps the REST routes onto the client registry and the
//! wash queue.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /`: plain-text health string
//! - `POST /clients`, `GET /clients`, `GET /clients/search?q=`, `PUT /clients/:id`
//! - `POST /services`, `GET /services?status=&date=`, `PATCH /services/:id/status`
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use carwash_queue::{http, model::Store};
//!
//! let store = Store::connect("memory://")?;
//! let state = Arc::new(http::AppState::new(store));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(state.clone());
//!
//! // Or serve directly
//! http::serve(state, "0.0.0.0:3000").await?;
//! ```

mod error;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, patch, put};
use axum::Router;
use tracing::info;

use crate::clients::ClientRegistry;
use crate::model::ModelStore;
use crate::washes::WashQueue;

pub use error::ApiError;

/// Shared state handed to every handler.
pub struct AppState<S> {
    pub clients: ClientRegistry<S>,
    pub queue: WashQueue<S>,
}

impl<S: ModelStore + Clone> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            clients: ClientRegistry::new(store.clone()),
            queue: WashQueue::new(store),
        }
    }
}

/// Build an axum `Router` over the given state.
pub fn router<S: ModelStore + Clone + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/clients",
            get(handlers::list_clients::<S>).post(handlers::create_client::<S>),
        )
        .route("/clients/search", get(handlers::search_clients::<S>))
        .route("/clients/:id", put(handlers::update_client::<S>))
        .route(
            "/services",
            get(handlers::list_services::<S>).post(handlers::register_service::<S>),
        )
        .route("/services/:id/status", patch(handlers::update_status::<S>))
        .with_state(state)
}

/// Serve over HTTP at `addr` (e.g. `"0.0.0.0:3000"`) until Ctrl-C.
pub async fn serve<S: ModelStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
