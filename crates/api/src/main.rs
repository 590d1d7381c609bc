//! Good Habits API - Main Entry Point

use api::{init_logging, run_server, ApiConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::load()?;
    init_logging(&config.logging)?;

    info!("=== Good Habits API v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config).await
}
