//! Technician location API for the SolarTrack service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Current positions** (`/api/v1/solar_farms/{farm_id}/technicians`):
//!   the most recent snapshot at or before the server clock
//! - **Historical positions**
//!   (`/api/v1/solar_farms/{farm_id}/technicians/{timestamp}`): the most
//!   recent snapshot at or before an epoch-seconds timestamp
//! - **Minimal HTML status page** (`GET /`) showing the loaded data range
//!
//! # Architecture
//!
//! The server reads from a [`SnapshotIndex`] built once at startup and
//! never modified afterwards, so every request is a lock-free read. The
//! clock behind the "current" route is injected through [`Clock`], which
//! lets tests pin it with [`FixedClock`].
//!
//! [`SnapshotIndex`]: solartrack_index::SnapshotIndex

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServeError, ServerConfig, start_server};
pub use state::{AppState, Clock, FixedClock, SystemClock};
