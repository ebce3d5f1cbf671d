//! Offline lookup of location strings to coordinates
//!
//! The cache is a JSON object mapping a location string to `[lat, lon]`,
//! or to `null` when an earlier lookup found nothing.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::Result;
use crate::models::Coordinate;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct GeoCache {
    entries: HashMap<String, Option<(f64, f64)>>,
}

impl GeoCache {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Geocache not found at {:?}, starting empty", path);
            return Ok(Self::default());
        }
        let cache = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("Loaded {} geocache entries from {:?}", cache.len(), path);
        Ok(cache)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Coordinate for `location`; `None` when unknown or known to be unresolvable
    #[must_use]
    pub fn lookup(&self, location: &str) -> Option<Coordinate> {
        self.entries
            .get(location)
            .copied()
            .flatten()
            .map(|(lat, lon)| Coordinate::new(lat, lon))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
