//! SolarTrack server binary.
//!
//! Loads technician snapshots from the configured data file, builds the
//! snapshot index once, and serves the technician location API until
//! `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `solartrack-config.yaml`
//! 3. Load snapshot records from the data file
//! 4. Build the snapshot index (malformed data aborts startup)
//! 5. Serve the API

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use solartrack_api::state::AppState;
use solartrack_index::{build_index, load_snapshots};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;
use crate::error::ServerError;

/// Name of the configuration file, relative to the working directory.
const CONFIG_FILE: &str = "solartrack-config.yaml";

/// Application entry point for the SolarTrack server.
///
/// # Errors
///
/// Returns an error if configuration or snapshot data is invalid, or if
/// the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("solartrack-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        snapshots_path = %config.data.snapshots_path.display(),
        "Configuration loaded"
    );

    // 3. Load snapshot records.
    let records = load_snapshots(&config.data.snapshots_path)?;

    // 4. Build the index.
    let index = build_index(records)?;
    info!(
        snapshots = index.len(),
        earliest = index.earliest().map(|s| s.timestamp),
        latest = index.latest().map(|s| s.timestamp),
        "Snapshot index ready"
    );

    // 5. Serve.
    let state = Arc::new(AppState::new(index));
    solartrack_api::start_server(&config.server_config(), state).await?;

    info!("solartrack-server shutdown complete");
    Ok(())
}

/// Load the service configuration from `solartrack-config.yaml`.
///
/// Falls back to defaults (plus environment overrides) when the file does
/// not exist.
fn load_config() -> Result<ServiceConfig, ServerError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(ServiceConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = ServiceConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}
