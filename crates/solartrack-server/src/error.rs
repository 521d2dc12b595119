//! Error types for the SolarTrack server binary.
//!
//! [`ServerError`] is the top-level error type that wraps all possible
//! failure modes during startup and serving.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// Snapshot data could not be loaded.
    #[error("snapshot load error: {source}")]
    Load {
        /// The underlying loader error.
        #[from]
        source: solartrack_index::LoadError,
    },

    /// The API server failed to bind or serve.
    #[error("server error: {source}")]
    Serve {
        /// The underlying server error.
        #[from]
        source: solartrack_api::ServeError,
    },
}

impl From<solartrack_index::MalformedInputError> for ServerError {
    fn from(source: solartrack_index::MalformedInputError) -> Self {
        Self::Load {
            source: solartrack_index::LoadError::Malformed(source),
        }
    }
}
