//! Population records with explicit per-record parsing.
//!
//! Upstream population data is messy: rows with missing coordinates,
//! unparseable counts, or out-of-range values are routine.  Instead of a
//! silent catch-all around the whole batch, each record parses on its own
//! and failures are counted — the skip count travels all the way to the
//! caller on [`Analysis`](crate::Analysis).

use gs_core::GeoPoint;
use thiserror::Error;

/// Why a single raw record was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{name}` out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

/// A population record as delivered by the provider, before validation.
/// `None` marks a field absent or unparseable at the source.
#[derive(Copy, Clone, Debug, Default)]
pub struct RawPopulationRecord {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub population: Option<f64>,
}

/// A validated settlement centroid with its population count.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationRecord {
    pub coordinate: GeoPoint,
    pub population: f64,
}

impl RawPopulationRecord {
    /// Validate one record.
    pub fn parse(&self) -> Result<PopulationRecord, RecordError> {
        let lat = self.lat.ok_or(RecordError::MissingField("lat"))?;
        let lon = self.lon.ok_or(RecordError::MissingField("lon"))?;
        let population = self.population.ok_or(RecordError::MissingField("population"))?;

        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(RecordError::OutOfRange { name: "lat", value: lat });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(RecordError::OutOfRange { name: "lon", value: lon });
        }
        if !population.is_finite() || population < 0.0 {
            return Err(RecordError::OutOfRange { name: "population", value: population });
        }

        Ok(PopulationRecord { coordinate: GeoPoint::new(lat, lon), population })
    }
}

/// Parse a raw batch, aggregating failures into a skip count.
pub fn parse_records(raw: &[RawPopulationRecord]) -> (Vec<PopulationRecord>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;
    for r in raw {
        match r.parse() {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::debug!(%err, "skipping malformed population record");
                skipped += 1;
            }
        }
    }
    (records, skipped)
}
