//! One-shot query: select the nearest records for a year, then route them

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::route_builder::RouteBuilder;
use super::selector::{Selection, select};
use crate::Result;
use crate::models::{Coordinate, GeoRecord, Route};

/// Number of locations shown when the caller does not ask otherwise
pub const DEFAULT_K: usize = 10;

/// Parameters of a single route query
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    pub year: i32,
    pub reference: Coordinate,
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    DEFAULT_K
}

impl RouteQuery {
    #[must_use]
    pub fn new(year: i32, reference: Coordinate) -> Self {
        Self {
            year,
            reference,
            k: DEFAULT_K,
        }
    }

    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }
}

/// Result of a route query
#[derive(Debug, Serialize, Clone, PartialEq)]
pub enum RoutePlan {
    Routed(Route),
    NoMatchingYear { year: i32 },
}

impl RoutePlan {
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        match self {
            RoutePlan::Routed(route) => Some(route),
            RoutePlan::NoMatchingYear { .. } => None,
        }
    }
}

/// Runs selection and route building for queries
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutePlanner {
    builder: RouteBuilder,
}

impl RoutePlanner {
    #[must_use]
    pub fn new(builder: RouteBuilder) -> Self {
        Self { builder }
    }

    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn plan(&self, records: &[GeoRecord], query: &RouteQuery) -> Result<RoutePlan> {
        let candidates = match select(records, query.year, query.reference, query.k)? {
            Selection::Matched(candidates) => candidates,
            Selection::NoMatchingYear { year } => {
                info!("No filming locations recorded for {}", year);
                return Ok(RoutePlan::NoMatchingYear { year });
            }
        };

        let route = self.builder.build(query.reference, &candidates)?;
        info!(
            "Routed {} locations from {} for {}: {:.1} km",
            route.len(),
            query.reference,
            query.year,
            route.total_km
        );
        Ok(RoutePlan::Routed(route))
    }
}
