use std::sync::Arc;

use carwash_queue::http::{self, AppState};
use carwash_queue::InMemoryModelStore;

/// Bind a fresh in-memory server to port 0 and return its base URL.
pub async fn start_server() -> String {
    let state = Arc::new(AppState::new(InMemoryModelStore::new()));
    let app = http::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
