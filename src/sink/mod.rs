//! Map sinks consuming finished routes

pub mod geojson;

pub use geojson::{GeoJsonSink, route_to_geojson};

use crate::Result;
use crate::models::Route;

/// Turns a route into a visual artifact
pub trait MapSink {
    fn render(&mut self, route: &Route) -> Result<()>;
}
