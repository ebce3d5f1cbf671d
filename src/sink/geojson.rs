//! GeoJSON rendering of a route
//!
//! Produces one `FeatureCollection` with a marker per stop, a marker for the
//! reference point and a `LineString` for the path. GeoJSON positions are
//! `[longitude, latitude]`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Value, json};
use tracing::info;

use super::MapSink;
use crate::Result;
use crate::models::{Coordinate, Route};

const REFERENCE_LABEL: &str = "You are here";

fn position(coordinate: Coordinate) -> Value {
    json!([coordinate.longitude, coordinate.latitude])
}

/// Build the GeoJSON document for `route`
#[must_use]
pub fn route_to_geojson(route: &Route) -> Value {
    let mut features: Vec<Value> = route
        .stops
        .iter()
        .enumerate()
        .map(|(idx, stop)| {
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": position(stop.coordinate) },
                "properties": {
                    "kind": "location",
                    "order": idx + 1,
                    "title": stop.title,
                    "year": stop.year,
                    "leg_km": route.legs_km.get(idx),
                }
            })
        })
        .collect();

    features.push(json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": position(route.reference) },
        "properties": { "kind": "reference", "title": REFERENCE_LABEL }
    }));

    if !route.is_empty() {
        let path: Vec<Value> = route.path().into_iter().map(position).collect();
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": path },
            "properties": { "kind": "path", "total_km": route.total_km }
        }));
    }

    json!({ "type": "FeatureCollection", "features": features })
}

/// Writes routes as GeoJSON to any writer
pub struct GeoJsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> GeoJsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl GeoJsonSink<BufWriter<File>> {
    /// Sink writing to a newly created file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Writing map to {:?}", path);
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> MapSink for GeoJsonSink<W> {
    fn render(&mut self, route: &Route) -> Result<()> {
        let document = route_to_geojson(route);
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &document)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
