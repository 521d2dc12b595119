//! Shared application state for the technician API.
//!
//! [`AppState`] holds the snapshot index built at startup and the clock
//! used to resolve "current" queries. Both are immutable for the life of
//! the server, so handlers read them without any locking.

use std::sync::Arc;

use solartrack_index::SnapshotIndex;

/// Source of the current wall-clock time in epoch seconds.
///
/// Injected into [`AppState`] so the "current location" route can be
/// exercised with a fixed time in tests.
pub trait Clock: Send + Sync {
    /// Current time as whole seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The snapshot index, built once at startup.
    pub index: Arc<SnapshotIndex>,
    /// Clock consulted by the "current location" route.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create application state that reads the system clock.
    pub fn new(index: SnapshotIndex) -> Self {
        Self::with_clock(index, SystemClock)
    }

    /// Create application state with an explicit clock.
    pub fn with_clock(index: SnapshotIndex, clock: impl Clock + 'static) -> Self {
        Self {
            index: Arc::new(index),
            clock: Arc::new(clock),
        }
    }

    /// Current time according to the configured clock.
    pub fn now(&self) -> i64 {
        self.clock.now()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("snapshots", &self.index.len())
            .field("now", &self.clock.now())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use solartrack_index::{Snapshot, build_index};

    use super::*;

    #[test]
    fn fixed_clock_drives_now() {
        let index = build_index(vec![Snapshot::new(10, serde_json::json!({}))]);
        assert!(index.is_ok());
        if let Ok(index) = index {
            let state = AppState::with_clock(index, FixedClock(1_592_078_400));
            assert_eq!(state.now(), 1_592_078_400);
            assert_eq!(state.index.len(), 1);
        }
    }

    #[test]
    fn system_clock_is_after_reference_data() {
        assert!(SystemClock.now() > 1_592_079_360);
    }
}
