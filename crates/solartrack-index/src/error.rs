//! Construction-time errors for the snapshot index.
//!
//! Every way a snapshot collection can be rejected is a variant of
//! [`MalformedInputError`]. These errors are fatal to startup: a service
//! must never answer queries from an index that failed validation.

/// A snapshot collection could not be turned into a valid index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedInputError {
    /// Two snapshots carry the same timestamp.
    #[error("duplicate snapshot timestamp {timestamp}")]
    DuplicateTimestamp {
        /// The timestamp that appeared more than once.
        timestamp: i64,
    },

    /// A record has no timestamp at the expected location.
    #[error("record {position} has no timestamp")]
    MissingTimestamp {
        /// Zero-based position of the record in the input collection.
        position: usize,
    },

    /// A record's timestamp is present but is not an integer.
    #[error("record {position} has a non-integer timestamp: {found}")]
    NonNumericTimestamp {
        /// Zero-based position of the record in the input collection.
        position: usize,
        /// The offending value, rendered as JSON.
        found: String,
    },
}
