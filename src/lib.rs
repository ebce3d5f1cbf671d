//! `filmroute` - nearest filming locations and a short route through them
//!
//! This library selects the filming locations of a given year closest to a
//! reference point and orders them into a short route for display on a map.

pub mod config;
pub mod error;
pub mod geo;
pub mod logging;
pub mod models;
pub mod routing;
pub mod sink;
pub mod source;

// Re-export core types for public API
pub use config::FilmRouteConfig;
pub use error::FilmRouteError;
pub use geo::distance;
pub use models::{Coordinate, GeoRecord, RankedCandidate, Route};
pub use routing::{RouteBuilder, RoutePlan, RoutePlanner, RouteQuery, Selection, select};
pub use sink::{GeoJsonSink, MapSink};
pub use source::{GeoCache, GeoRecordSource, InMemorySource, JsonRecordSource, LocationsListSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FilmRouteError>;
