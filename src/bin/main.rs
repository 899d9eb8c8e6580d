//! Car-wash queue server binary.

use std::sync::Arc;

use carwash_queue::config::Config;
use carwash_queue::http::{self, AppState};
use carwash_queue::logging;
use carwash_queue::model::Store;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    logging::init(&config.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "carwash-queue starting");

    let store = Store::connect(&config.store_url)?;
    let state = Arc::new(AppState::new(store));

    http::serve(state, &config.bind_address()).await?;
    info!("carwash-queue stopped");
    Ok(())
}
