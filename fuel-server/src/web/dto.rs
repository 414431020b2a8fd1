//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{FuelType, GeocodedPlace, Route};
use crate::planner::{CheapestStation, RouteStation, StationWithDistance};

/// Request for stations near a position.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    /// Latitude of the driver's position
    pub lat: f64,

    /// Longitude of the driver's position
    pub lng: f64,

    /// Optional brand filter (case-insensitive)
    pub brand: Option<String>,

    /// Maximum number of stations to return
    pub limit: Option<usize>,
}

/// Request for the cheapest station within a radius.
#[derive(Debug, Deserialize)]
pub struct CheapestRequest {
    /// Latitude of the driver's position
    pub lat: f64,

    /// Longitude of the driver's position
    pub lng: f64,

    /// Fuel to compare prices on
    pub fuel: FuelType,

    /// Optional brand filter (case-insensitive)
    pub brand: Option<String>,

    /// Search radius in kilometres
    pub radius_km: Option<f64>,
}

/// Request to plan fuel stops along a route.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Latitude of the driver's position
    pub lat: f64,

    /// Longitude of the driver's position
    pub lng: f64,

    /// Free-text destination, geocoded server-side
    pub destination: String,

    /// Fuel to rank prices on
    pub fuel: FuelType,

    /// Corridor half-width in kilometres
    pub corridor_km: Option<f64>,
}

/// A station in nearest-station results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub municipality: Option<String>,
    pub province: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub fuel95: Option<f64>,

    #[serde(rename = "fuelDiesel")]
    pub fuel_diesel: Option<f64>,

    pub horario: Option<String>,

    /// Straight-line distance from the driver in kilometres
    pub distance_km: f64,
}

impl From<&StationWithDistance> for StationResult {
    fn from(entry: &StationWithDistance) -> Self {
        let s = entry.station.as_ref();
        Self {
            id: s.id.as_str().to_string(),
            name: s.name.clone(),
            address: s.address.clone(),
            municipality: s.municipality.clone(),
            province: s.province.clone(),
            lat: s.lat,
            lng: s.lng,
            fuel95: s.fuel95,
            fuel_diesel: s.fuel_diesel,
            horario: s.horario.clone(),
            distance_km: entry.distance_km,
        }
    }
}

/// Response for nearest-station search.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    /// Stations ordered nearest-first
    pub stations: Vec<StationResult>,

    /// Distinct brands among the returned stations
    pub brands: Vec<String>,
}

/// The winning station in a cheapest-station search.
#[derive(Debug, Serialize)]
pub struct CheapestResult {
    #[serde(flatten)]
    pub station: StationResult,

    /// Price for the requested fuel
    pub price: f64,

    /// Estimated arrival instant, RFC 3339
    pub arrival_time: Option<String>,

    pub open_at_arrival: crate::domain::OpenStatus,
}

impl From<&CheapestStation> for CheapestResult {
    fn from(entry: &CheapestStation) -> Self {
        let annotated = StationWithDistance {
            station: entry.station.clone(),
            distance_km: entry.distance_km,
        };
        Self {
            station: StationResult::from(&annotated),
            price: entry.price,
            arrival_time: entry.arrival_time.map(|t| t.to_rfc3339()),
            open_at_arrival: entry.open_at_arrival,
        }
    }
}

/// Response for cheapest-station search.
#[derive(Debug, Serialize)]
pub struct CheapestResponse {
    /// The cheapest station, absent when nothing is in range
    pub station: Option<CheapestResult>,
}

/// A ranked station along the planned route.
#[derive(Debug, Serialize)]
pub struct RouteStationResult {
    #[serde(flatten)]
    pub station: StationResult,

    /// Deviation from the route in kilometres
    pub distance_to_route_km: f64,

    /// Estimated arrival instant, RFC 3339
    pub arrival_time: Option<String>,

    pub open_at_arrival: crate::domain::OpenStatus,
}

impl From<&RouteStation> for RouteStationResult {
    fn from(entry: &RouteStation) -> Self {
        let annotated = StationWithDistance {
            station: entry.station.clone(),
            distance_km: entry.distance_km,
        };
        Self {
            station: StationResult::from(&annotated),
            distance_to_route_km: entry.distance_to_route_km,
            arrival_time: entry.arrival_time.map(|t| t.to_rfc3339()),
            open_at_arrival: entry.open_at_arrival,
        }
    }
}

/// The geocoded destination in a plan response.
#[derive(Debug, Serialize)]
pub struct DestinationResult {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<&GeocodedPlace> for DestinationResult {
    fn from(place: &GeocodedPlace) -> Self {
        Self {
            label: place.label.clone(),
            lat: place.coord.lat,
            lng: place.coord.lng,
        }
    }
}

/// Route summary in a plan response.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    /// Route geometry as [lng, lat] pairs
    pub geometry: Vec<[f64; 2]>,

    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            geometry: route.geometry.iter().map(|c| [c.lng, c.lat]).collect(),
            distance_meters: route.distance_meters,
            duration_seconds: route.duration_seconds,
        }
    }
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    pub destination: DestinationResult,
    pub route: RouteSummary,

    /// Corridor stations ranked best-first
    pub stations: Vec<RouteStationResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
