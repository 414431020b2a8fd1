//! Fuel stop planner.
//!
//! This module answers the two questions the service exists for:
//! "which stations are near me?" and "where should I stop for fuel on
//! my way to this destination?"
//!
//! The route flow geocodes the destination, keeps the stations inside
//! a corridor around the driving route, estimates when the driver
//! would reach each one and ranks them by open status, deviation and
//! price.

mod config;
mod corridor;
mod enrich;
mod nearby;
mod plan;
mod rank;

pub use config::PlannerConfig;
pub use corridor::{CorridorStation, filter_corridor};
pub use enrich::{RouteStation, enrich_arrivals};
pub use nearby::{
    CheapestStation, StationWithDistance, available_brands, cheapest_station, nearest_stations,
    stations_with_distance,
};
pub use plan::{Geocoder, PlanError, PlanRequest, PlanResult, RoutePlanner, RoutingProvider};
pub use rank::rank_route_stations;
