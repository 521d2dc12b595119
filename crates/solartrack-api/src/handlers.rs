//! REST API endpoint handlers for the technician API.
//!
//! All handlers read from the immutable [`SnapshotIndex`] held in the
//! shared [`AppState`]. The `farm_id` path segment is accepted on every
//! route but does not filter anything: there is one data set per server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/v1/solar_farms/:farm_id/technicians` | Technician positions now |
//! | `GET` | `/api/v1/solar_farms/:farm_id/technicians/:timestamp` | Technician positions at a time |
//!
//! [`SnapshotIndex`]: solartrack_index::SnapshotIndex

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use solartrack_index::Snapshot;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the loaded data range and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot_count = state.index.len();
    let earliest = describe(state.index.earliest());
    let latest = describe(state.index.latest());
    let now = state.now();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>SolarTrack</title>
    <style>
        body {{ font-family: monospace; padding: 2rem; max-width: 800px; margin: 0 auto; }}
        dt {{ font-weight: bold; }}
        dd {{ margin: 0 0 0.75rem 0; }}
    </style>
</head>
<body>
    <h1>SolarTrack</h1>
    <p>Technician location service</p>

    <dl>
        <dt>Snapshots</dt><dd>{snapshot_count}</dd>
        <dt>Earliest</dt><dd>{earliest}</dd>
        <dt>Latest</dt><dd>{latest}</dd>
        <dt>Server time</dt><dd>{now}</dd>
    </dl>

    <h2>API Endpoints</h2>
    <ul>
        <li>GET /api/v1/solar_farms/:farm_id/technicians -- Technician positions now</li>
        <li>GET /api/v1/solar_farms/:farm_id/technicians/:timestamp -- Technician positions at an epoch second</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/v1/solar_farms/:farm_id/technicians -- positions now
// ---------------------------------------------------------------------------

/// Return the most recent snapshot at or before the server's current time.
///
/// Responds 400 if the clock is earlier than the first snapshot.
pub async fn current_technicians(
    State(state): State<Arc<AppState>>,
    Path(farm_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let now = state.now();
    snapshot_payload(&farm_id, now, state.index.find_current(now))
}

// ---------------------------------------------------------------------------
// GET /api/v1/solar_farms/:farm_id/technicians/:timestamp -- positions at a time
// ---------------------------------------------------------------------------

/// Return the most recent snapshot at or before `timestamp` (epoch seconds).
///
/// Responds 400 if `timestamp` is not an integer or precedes the first
/// snapshot.
pub async fn technicians_at(
    State(state): State<Arc<AppState>>,
    Path((farm_id, raw_timestamp)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let at = parse_timestamp(&raw_timestamp)?;
    snapshot_payload(&farm_id, at, state.index.find_at_or_before(at))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn a lookup result into the JSON response body.
fn snapshot_payload(
    farm_id: &str,
    at: i64,
    found: Option<&Snapshot>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(snapshot) = found else {
        debug!(farm_id, at, "No snapshot at or before query time");
        return Err(ApiError::NoSnapshot { at });
    };

    debug!(farm_id, at, snapshot = snapshot.timestamp, "Serving snapshot");
    Ok(Json(serde_json::to_value(&snapshot.payload)?))
}

/// Parse an epoch-seconds timestamp from a path segment.
fn parse_timestamp(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|e| ApiError::InvalidTimestamp(format!("{raw}: {e}")))
}

/// Render a snapshot's timestamp for the status page.
fn describe(snapshot: Option<&Snapshot>) -> String {
    snapshot.map_or_else(
        || String::from("none"),
        |s| {
            chrono::DateTime::from_timestamp(s.timestamp, 0)
                .map_or_else(|| s.timestamp.to_string(), |dt| dt.to_rfc3339())
        },
    )
}
