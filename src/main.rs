//! Attendance Engine HTTP server.
//!
//! Environment:
//! - `ATTENDANCE_CONFIG_DIR`: directory holding `settings.yaml` and
//!   `employees.yaml` (default `./config/default`)
//! - `SERVER_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;
use std::sync::Arc;

use attendance_engine::api::{create_router, AppState};
use attendance_engine::clock::SystemClock;
use attendance_engine::config::ConfigLoader;
use attendance_engine::store::MemoryStore;
use attendance_engine::tracker::AttendanceTracker;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_dir = env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        employees = config.employees().len(),
        "Configuration loaded"
    );

    let store = Arc::new(MemoryStore::with_employees(config.employees().to_vec()));
    let tracker = AttendanceTracker::new(config.settings().clone(), store, Arc::new(SystemClock));
    let router = create_router(AppState::new(tracker));

    let listener = tokio::net::TcpListener::bind(&server_addr).await?;
    info!(addr = %server_addr, "Server starting");
    axum::serve(listener, router).await?;

    Ok(())
}
