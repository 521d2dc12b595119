//! Error types for the technician API.
//!
//! [`ApiError`] unifies all request-level failure modes into a single enum
//! that converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur while answering a technician location request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No snapshot exists at or before the requested time.
    #[error("no technician data available at or before {at}")]
    NoSnapshot {
        /// The query timestamp in epoch seconds.
        at: i64,
    },

    /// The timestamp path segment is not a valid integer.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NoSnapshot { .. } | Self::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
