//! Time-indexed technician snapshot lookup for the SolarTrack service.
//!
//! A snapshot is one recording of every technician's position on a solar
//! farm at a single instant. This crate answers the one question the API
//! needs: which snapshot was current at a given epoch second?
//!
//! # Modules
//!
//! - [`index`] -- [`SnapshotIndex`], the sorted, immutable lookup structure
//! - [`snapshot`] -- the [`Snapshot`] record and GeoJSON timestamp extraction
//! - [`loader`] -- reading snapshot records from the JSON data file
//! - [`error`] -- [`MalformedInputError`] raised at construction time
//!
//! # Example
//!
//! ```
//! use solartrack_index::{build_index, Snapshot};
//!
//! let index = build_index(vec![
//!     Snapshot::new(1_592_078_460, "second"),
//!     Snapshot::new(1_592_078_400, "first"),
//! ])?;
//!
//! assert_eq!(index.find_at_or_before(1_592_078_459).map(|s| s.payload), Some("first"));
//! assert!(index.find_at_or_before(555).is_none());
//! # Ok::<(), solartrack_index::MalformedInputError>(())
//! ```

pub mod error;
pub mod index;
pub mod loader;
pub mod snapshot;

pub use error::MalformedInputError;
pub use index::{SnapshotIndex, build_index};
pub use loader::{LoadError, load_snapshots, parse_snapshots};
pub use snapshot::Snapshot;
