//! Data models for filmroute
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: validated latitude/longitude pairs
//! - Record: filming locations and their ranked form
//! - Route: the ordered visit produced by the route builder

pub mod coordinate;
pub mod record;
pub mod route;

// Re-export all public types for convenient access
pub use coordinate::Coordinate;
pub use record::{GeoRecord, RankedCandidate};
pub use route::Route;
