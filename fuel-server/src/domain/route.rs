//! Routing and geocoding collaborator outputs.

use super::coord::Coord;

/// A driving route produced by the routing collaborator. Read-only.
#[derive(Debug, Clone)]
pub struct Route {
    /// Ordered polyline vertices of the driving geometry.
    pub geometry: Vec<Coord>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Best geocoding match for a destination query.
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    pub coord: Coord,
    /// Human-readable label for the match.
    pub label: String,
}
