//! Record sources
//!
//! Everything that turns a persisted dataset into `GeoRecord`s lives here:
//! - In-memory and JSON record lists
//! - IMDb `locations.list` files resolved through a geocache

pub mod geocache;
pub mod json;
pub mod locations_list;

pub use geocache::GeoCache;
pub use json::JsonRecordSource;
pub use locations_list::{LocationEntry, LocationsListParser, LocationsListSource};

use crate::Result;
use crate::models::GeoRecord;

/// Supplies the full set of records a query runs against
pub trait GeoRecordSource {
    fn records(&self) -> Result<Vec<GeoRecord>>;
}

/// Records already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<GeoRecord>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(records: Vec<GeoRecord>) -> Self {
        Self { records }
    }
}

impl From<Vec<GeoRecord>> for InMemorySource {
    fn from(records: Vec<GeoRecord>) -> Self {
        Self::new(records)
    }
}

impl GeoRecordSource for InMemorySource {
    fn records(&self) -> Result<Vec<GeoRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    #[test]
    fn test_in_memory_source_returns_records_in_order() {
        let source = InMemorySource::from(vec![
            GeoRecord::new("a", 2000, Coordinate::new(1.0, 1.0)),
            GeoRecord::new("b", 2001, Coordinate::new(2.0, 2.0)),
        ]);
        let records = source.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "a");
        assert_eq!(records[1].title, "b");
    }
}
