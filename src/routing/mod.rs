//! Routing module
//!
//! This module provides the query engine:
//! - Nearest-K selection of records for a year around a reference point
//! - Nearest-neighbor route construction with optional 2-opt improvement
//! - A planner running both steps for one query

pub mod planner;
pub mod route_builder;
pub mod selector;

pub use planner::{DEFAULT_K, RoutePlan, RoutePlanner, RouteQuery};
pub use route_builder::{RouteBuilder, build_route};
pub use selector::{Selection, select};
