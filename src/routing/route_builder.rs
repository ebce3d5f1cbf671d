//! Route construction over selected candidates
//!
//! Greedy nearest-neighbor ordering from a fixed start point, with an
//! optional 2-opt pass on the resulting open path.

use tracing::debug;

use crate::Result;
use crate::geo::distance::{distance, haversine_km};
use crate::models::{Coordinate, GeoRecord, RankedCandidate, Route};

/// Relative tolerance under which two distances count as a tie
const TIE_TOLERANCE: f64 = 1e-9;
/// Minimum gain in kilometers for a 2-opt move to be applied
const TWO_OPT_IMPROVEMENT_EPSILON: f64 = 1e-9;
/// Open paths shorter than this (reference included) cannot be improved
const MIN_PATH_SIZE_FOR_2OPT: usize = 3;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_TOLERANCE * a.abs().max(b.abs())
}

/// Builds routes from ranked candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteBuilder {
    two_opt_passes: Option<usize>,
}

impl RouteBuilder {
    /// Nearest-neighbor only
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run up to `passes` 2-opt sweeps after the greedy construction
    #[must_use]
    pub fn with_two_opt(mut self, passes: usize) -> Self {
        self.two_opt_passes = (passes > 0).then_some(passes);
        self
    }

    #[must_use]
    pub fn two_opt_passes(&self) -> Option<usize> {
        self.two_opt_passes
    }

    /// Order `candidates` into a route starting at `reference`.
    ///
    /// Ties go to the candidate that comes first in `candidates`.
    pub fn build(&self, reference: Coordinate, candidates: &[RankedCandidate]) -> Result<Route> {
        reference.validate()?;
        if candidates.is_empty() {
            return Ok(Route::empty(reference));
        }

        let mut unvisited: Vec<&GeoRecord> = candidates.iter().map(|c| &c.record).collect();
        let mut stops: Vec<GeoRecord> = Vec::with_capacity(unvisited.len());
        let mut current = reference;

        while !unvisited.is_empty() {
            let mut best_idx = 0;
            let mut best = distance(current, unvisited[0].coordinate)?;
            for (idx, record) in unvisited.iter().enumerate().skip(1) {
                let d = distance(current, record.coordinate)?;
                if d < best && !approx_eq(d, best) {
                    best = d;
                    best_idx = idx;
                }
            }
            // `remove` keeps the remaining candidates in selector order.
            let next = unvisited.remove(best_idx);
            current = next.coordinate;
            stops.push(next.clone());
        }

        if let Some(passes) = self.two_opt_passes {
            two_opt(reference, &mut stops, passes);
        }

        let route = finish_route(reference, stops);
        debug!(
            "Built route with {} stops, total {:.3} km",
            route.len(),
            route.total_km
        );
        Ok(route)
    }
}

/// Nearest-neighbor route without improvement
pub fn build_route(reference: Coordinate, candidates: &[RankedCandidate]) -> Result<Route> {
    RouteBuilder::new().build(reference, candidates)
}

fn finish_route(reference: Coordinate, stops: Vec<GeoRecord>) -> Route {
    let mut legs_km = Vec::with_capacity(stops.len());
    let mut previous = reference;
    for stop in &stops {
        legs_km.push(haversine_km(previous, stop.coordinate));
        previous = stop.coordinate;
    }
    let total_km = legs_km.iter().sum();
    Route {
        reference,
        stops,
        legs_km,
        total_km,
    }
}

/// 2-opt on the open path `reference, stops[0], .., stops[n-1]`.
///
/// The reference never moves. Reversing a suffix only replaces one edge,
/// since the path has no closing edge.
fn two_opt(reference: Coordinate, stops: &mut [GeoRecord], passes: usize) {
    let n = stops.len() + 1;
    if n < MIN_PATH_SIZE_FOR_2OPT {
        debug!("route.2opt: skip n={} reason=insufficient_input", n);
        return;
    }

    let point = |stops: &[GeoRecord], idx: usize| -> Coordinate {
        if idx == 0 {
            reference
        } else {
            stops[idx - 1].coordinate
        }
    };

    let mut total_swaps = 0usize;
    for pass_idx in 0..passes {
        let mut pass_swaps = 0usize;

        for i in 0..n - 2 {
            for k in (i + 2)..n {
                let a = point(stops, i);
                let b = point(stops, i + 1);
                let c = point(stops, k);

                let (cur_dist, new_dist) = if k + 1 < n {
                    let d = point(stops, k + 1);
                    (
                        haversine_km(a, b) + haversine_km(c, d),
                        haversine_km(a, c) + haversine_km(b, d),
                    )
                } else {
                    (haversine_km(a, b), haversine_km(a, c))
                };

                if new_dist < cur_dist - TWO_OPT_IMPROVEMENT_EPSILON {
                    // path positions i+1..=k are stops[i..k]
                    stops[i..k].reverse();
                    pass_swaps += 1;
                }
            }
        }

        total_swaps += pass_swaps;
        debug!("route.2opt: pass={} swaps={}", pass_idx + 1, pass_swaps);

        if pass_swaps == 0 {
            break;
        }
    }
    debug!("route.2opt: complete n={} swaps={}", n, total_swaps);
}
