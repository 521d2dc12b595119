//! A single timestamped record of technician positions.
//!
//! The index never looks inside a payload. The only place the payload
//! format matters is [`Snapshot::from_feature_collection`], which pulls the
//! timestamp out of a GeoJSON feature collection as the data file stores it.

use serde_json::Value;

use crate::error::MalformedInputError;

/// Property key holding the epoch-seconds timestamp of a feature.
pub const TIMESTAMP_FIELD: &str = "tsecs";

/// One snapshot: an epoch-seconds timestamp and an opaque payload.
///
/// The payload defaults to [`serde_json::Value`], which is what the HTTP
/// layer serves back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<P = Value> {
    /// Epoch seconds at which the positions were recorded.
    pub timestamp: i64,
    /// The recorded data, untouched by the index.
    pub payload: P,
}

impl<P> Snapshot<P> {
    /// Pair a payload with its already-extracted timestamp.
    pub const fn new(timestamp: i64, payload: P) -> Self {
        Self { timestamp, payload }
    }
}

impl Snapshot<Value> {
    /// Build a snapshot from a GeoJSON feature collection.
    ///
    /// The timestamp is read from `features[0].properties.tsecs`. The whole
    /// collection is kept as the payload.
    ///
    /// `position` is the record's index in its source collection and is
    /// only used for error reporting.
    ///
    /// # Errors
    ///
    /// - [`MalformedInputError::MissingTimestamp`] if there is no first
    ///   feature, it has no properties, or `tsecs` is absent or `null`.
    /// - [`MalformedInputError::NonNumericTimestamp`] if `tsecs` is not an
    ///   integer that fits in `i64` (strings and floats included).
    pub fn from_feature_collection(
        position: usize,
        payload: Value,
    ) -> Result<Self, MalformedInputError> {
        let raw = payload
            .get("features")
            .and_then(Value::as_array)
            .and_then(|features| features.first())
            .and_then(|feature| feature.get("properties"))
            .and_then(|properties| properties.get(TIMESTAMP_FIELD))
            .filter(|value| !value.is_null())
            .ok_or(MalformedInputError::MissingTimestamp { position })?;

        let timestamp =
            raw.as_i64()
                .ok_or_else(|| MalformedInputError::NonNumericTimestamp {
                    position,
                    found: raw.to_string(),
                })?;

        Ok(Self { timestamp, payload })
    }
}
