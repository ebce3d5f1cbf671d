//! Filming location records and their ranking against a reference point

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A single filming location of a title in a given year
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoRecord {
    pub title: String,
    pub year: i32,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl GeoRecord {
    #[must_use]
    pub fn new(title: impl Into<String>, year: i32, coordinate: Coordinate) -> Self {
        Self {
            title: title.into(),
            year,
            coordinate,
        }
    }
}

/// A record together with its distance to the query reference point
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RankedCandidate {
    pub record: GeoRecord,
    /// Great-circle distance to the reference in kilometers
    pub distance_km: f64,
}
