use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use super::GeoRecordSource;
use crate::Result;
use crate::models::GeoRecord;

/// JSON array of `{title, year, latitude, longitude}` objects on disk
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    path: PathBuf,
}

impl JsonRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse<R: Read>(reader: R) -> Result<Vec<GeoRecord>> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl GeoRecordSource for JsonRecordSource {
    fn records(&self) -> Result<Vec<GeoRecord>> {
        info!("Loading records from: {:?}", self.path);
        let file = File::open(&self.path)?;
        let records = Self::parse(BufReader::new(file))?;
        info!("Loaded {} records", records.len());
        Ok(records)
    }
}
