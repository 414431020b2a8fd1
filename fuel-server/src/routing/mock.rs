//! Mock routing collaborator for tests.
//!
//! Serves a canned route, geocoding match and per-waypoint durations so
//! the planner pipeline can be exercised without network access.
//! Individual waypoints can be marked as failing to exercise the
//! soft-failure path.

use std::collections::{HashMap, HashSet};

use crate::domain::{Coord, GeocodedPlace, Route};
use crate::planner::{Geocoder, RoutingProvider};

use super::error::RoutingError;

/// Coordinates rounded to 1e-6 degrees, usable as a map key.
fn key(coord: Coord) -> (i64, i64) {
    (
        (coord.lat * 1e6).round() as i64,
        (coord.lng * 1e6).round() as i64,
    )
}

/// In-memory routing and geocoding provider with canned responses.
#[derive(Debug, Clone, Default)]
pub struct MockRouting {
    route: Option<Route>,
    geocoded: Option<GeocodedPlace>,
    durations: HashMap<(i64, i64), f64>,
    failing: HashSet<(i64, i64)>,
}

impl MockRouting {
    /// Create a mock with no canned responses; every lookup fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the route returned by `route_between`.
    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    /// Set the match returned by `geocode`.
    pub fn with_geocoded(mut self, place: GeocodedPlace) -> Self {
        self.geocoded = Some(place);
        self
    }

    /// Set the duration in seconds for lookups targeting `coord`.
    pub fn with_duration(mut self, coord: Coord, seconds: f64) -> Self {
        self.durations.insert(key(coord), seconds);
        self
    }

    /// Make every lookup targeting `coord` fail.
    pub fn with_failing(mut self, coord: Coord) -> Self {
        self.failing.insert(key(coord));
        self
    }

    fn duration_for(&self, target: Coord) -> Result<f64, RoutingError> {
        if self.failing.contains(&key(target)) {
            return Err(RoutingError::Api {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        self.durations
            .get(&key(target))
            .copied()
            .ok_or(RoutingError::NoRoute)
    }
}

impl RoutingProvider for MockRouting {
    async fn route_between(&self, _origin: Coord, _destination: Coord) -> Result<Route, RoutingError> {
        self.route.clone().ok_or(RoutingError::NoRoute)
    }

    async fn duration_via_waypoint(
        &self,
        _origin: Coord,
        waypoint: Coord,
        _destination: Coord,
    ) -> Result<f64, RoutingError> {
        self.duration_for(waypoint)
    }

    async fn duration_between(&self, _origin: Coord, target: Coord) -> Option<f64> {
        self.duration_for(target).ok()
    }
}

impl Geocoder for MockRouting {
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, RoutingError> {
        self.geocoded
            .clone()
            .ok_or_else(|| RoutingError::NoGeocodeMatch {
                query: query.to_string(),
            })
    }
}
