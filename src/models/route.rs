//! Ordered route through selected filming locations

use serde::Serialize;

use super::{Coordinate, GeoRecord};

/// An ordered visit of records starting from a reference point.
///
/// The reference is the start anchor only; `stops` never contains it.
/// `legs_km[0]` is reference to first stop, `legs_km[i]` is stop `i - 1`
/// to stop `i`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Route {
    pub reference: Coordinate,
    pub stops: Vec<GeoRecord>,
    pub legs_km: Vec<f64>,
    pub total_km: f64,
}

impl Route {
    /// Route with no stops and zero length
    #[must_use]
    pub fn empty(reference: Coordinate) -> Self {
        Self {
            reference,
            stops: Vec::new(),
            legs_km: Vec::new(),
            total_km: 0.0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Reference followed by every stop, for drawing the path
    #[must_use]
    pub fn path(&self) -> Vec<Coordinate> {
        std::iter::once(self.reference)
            .chain(self.stops.iter().map(|stop| stop.coordinate))
            .collect()
    }
}
