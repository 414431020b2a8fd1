//! Route planning pipeline.
//!
//! Geocodes the destination, routes from the driver's position, keeps
//! the stations inside the corridor around the route, enriches them
//! with arrival estimates and ranks them best-first.

use chrono::{DateTime, Local};
use tracing::info;

use crate::domain::{Coord, FuelType, GeocodedPlace, Route};
use crate::routing::RoutingError;

use super::config::PlannerConfig;
use super::corridor::filter_corridor;
use super::enrich::{RouteStation, enrich_arrivals};
use super::nearby::StationWithDistance;
use super::rank::rank_route_stations;

/// Trait for driving-route and travel-time lookups.
///
/// This abstraction allows the planner to be tested with mock data.
pub trait RoutingProvider {
    /// Get the driving route between two points.
    fn route_between(
        &self,
        origin: Coord,
        destination: Coord,
    ) -> impl Future<Output = Result<Route, RoutingError>> + Send;

    /// Get the driving duration in seconds from `origin` to `waypoint`,
    /// continuing to `destination`. Only the first leg's duration is
    /// returned.
    fn duration_via_waypoint(
        &self,
        origin: Coord,
        waypoint: Coord,
        destination: Coord,
    ) -> impl Future<Output = Result<f64, RoutingError>> + Send;

    /// Get the driving duration in seconds from `origin` to `target`,
    /// or `None` when the lookup fails.
    fn duration_between(
        &self,
        origin: Coord,
        target: Coord,
    ) -> impl Future<Output = Option<f64>> + Send;
}

/// Trait for resolving a free-text place query to coordinates.
pub trait Geocoder {
    /// Resolve `query` to its best match.
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<GeocodedPlace, RoutingError>> + Send;
}

/// Error from route planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The destination query was empty
    #[error("destination must not be empty")]
    EmptyDestination,

    /// The origin coordinates were not finite
    #[error("origin coordinates must be finite")]
    InvalidOrigin,

    /// The destination could not be geocoded
    #[error("geocoding failed: {0}")]
    Geocoding(#[source] RoutingError),

    /// The route could not be computed
    #[error("routing failed: {0}")]
    Routing(#[source] RoutingError),
}

/// Request for route planning.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// The driver's current position.
    pub origin: Coord,

    /// Free-text destination, resolved via geocoding.
    pub destination_query: String,

    /// The fuel the driver wants to buy.
    pub fuel: FuelType,
}

impl PlanRequest {
    /// Create a new plan request.
    pub fn new(origin: Coord, destination_query: impl Into<String>, fuel: FuelType) -> Self {
        Self {
            origin,
            destination_query: destination_query.into(),
            fuel,
        }
    }

    /// Validate the plan request.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.origin.is_finite() {
            return Err(PlanError::InvalidOrigin);
        }
        if self.destination_query.trim().is_empty() {
            return Err(PlanError::EmptyDestination);
        }
        Ok(())
    }
}

/// Result of route planning.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// The geocoded destination.
    pub destination: GeocodedPlace,

    /// The driving route from origin to destination.
    pub route: Route,

    /// Corridor stations, ranked best-first.
    pub stations: Vec<RouteStation>,
}

/// Plans fuel stops along a driving route.
pub struct RoutePlanner<'a, R> {
    routing: &'a R,
    config: PlannerConfig,
}

impl<'a, R: RoutingProvider + Geocoder> RoutePlanner<'a, R> {
    /// Create a planner over the given routing collaborator.
    pub fn new(routing: &'a R, config: PlannerConfig) -> Self {
        Self { routing, config }
    }

    /// Run the full planning pipeline.
    ///
    /// `stations` carries the candidate stations with their straight-line
    /// distance from the driver already computed; `now` anchors the
    /// arrival estimates.
    pub async fn plan(
        &self,
        request: &PlanRequest,
        stations: &[StationWithDistance],
        now: DateTime<Local>,
    ) -> Result<PlanResult, PlanError> {
        request.validate()?;

        let destination = self
            .routing
            .geocode(request.destination_query.trim())
            .await
            .map_err(PlanError::Geocoding)?;

        let route = self
            .routing
            .route_between(request.origin, destination.coord)
            .await
            .map_err(PlanError::Routing)?;

        let corridor = filter_corridor(stations, &route.geometry, self.config.corridor_radius_km);

        info!(
            destination = %destination.label,
            candidates = stations.len(),
            in_corridor = corridor.len(),
            "planned route"
        );

        let enriched = enrich_arrivals(
            self.routing,
            corridor,
            request.origin,
            destination.coord,
            now,
        )
        .await;

        Ok(PlanResult {
            destination,
            route,
            stations: rank_route_stations(enriched, request.fuel),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OpenStatus, Station, StationId};
    use crate::planner::nearby::stations_with_distance;
    use crate::routing::mock::MockRouting;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn station(id: &str, lat: f64, lng: f64, fuel95: Option<f64>, horario: Option<&str>) -> Arc<Station> {
        Arc::new(Station {
            id: StationId::new(id),
            name: Some(format!("Station {id}")),
            address: None,
            municipality: None,
            province: None,
            lat: Some(lat),
            lng: Some(lng),
            fuel95,
            fuel_diesel: None,
            horario: horario.map(str::to_string),
        })
    }

    fn west_east_route() -> Route {
        Route {
            geometry: vec![Coord::new(40.0, -3.2), Coord::new(40.0, -3.0)],
            distance_meters: 17_000.0,
            duration_seconds: 900.0,
        }
    }

    fn request() -> PlanRequest {
        PlanRequest::new(Coord::new(40.0, -3.2), "Guadalajara", FuelType::Petrol95)
    }

    // Monday.
    fn monday_ten() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    fn routing() -> MockRouting {
        MockRouting::new()
            .with_geocoded(GeocodedPlace {
                coord: Coord::new(40.0, -3.0),
                label: "Guadalajara".to_string(),
            })
            .with_route(west_east_route())
    }

    #[tokio::test]
    async fn keeps_corridor_stations_and_ranks_them() {
        // X sits ~0.44 km off the route, Y ~2.2 km off.
        let stations = vec![
            station("X", 40.004, -3.1, Some(1.50), Some("L-V 08:00-22:00")),
            station("Y", 40.02, -3.1, Some(1.40), Some("24H")),
        ];
        let annotated = stations_with_distance(&stations, Coord::new(40.0, -3.2));

        let routing = routing().with_duration(Coord::new(40.004, -3.1), 600.0);

        let planner = RoutePlanner::new(&routing, PlannerConfig::default());
        let result = planner.plan(&request(), &annotated, monday_ten()).await.unwrap();

        assert_eq!(result.destination.label, "Guadalajara");
        assert_eq!(result.stations.len(), 1);
        assert_eq!(result.stations[0].station.id.as_str(), "X");
        assert_eq!(result.stations[0].open_at_arrival, OpenStatus::Open);
        assert!(result.stations[0].arrival_time.is_some());
    }

    #[tokio::test]
    async fn failed_duration_lookup_keeps_station_with_unknown_status() {
        let stations = vec![
            station("open", 40.001, -3.05, Some(1.60), Some("24H")),
            station("broken", 40.001, -3.10, Some(1.40), Some("24H")),
            station("closed", 40.001, -3.15, Some(1.30), Some("S-D 08:00-14:00")),
        ];
        let annotated = stations_with_distance(&stations, Coord::new(40.0, -3.2));

        let routing = routing()
            .with_duration(Coord::new(40.001, -3.05), 600.0)
            .with_duration(Coord::new(40.001, -3.15), 300.0)
            .with_failing(Coord::new(40.001, -3.10));

        let planner = RoutePlanner::new(&routing, PlannerConfig::default());
        let result = planner.plan(&request(), &annotated, monday_ten()).await.unwrap();

        // Unknown ranks between open and closed.
        let ids: Vec<&str> = result.stations.iter().map(|s| s.station.id.as_str()).collect();
        assert_eq!(ids, vec!["open", "broken", "closed"]);
        assert_eq!(result.stations[1].open_at_arrival, OpenStatus::Unknown);
        assert_eq!(result.stations[1].arrival_time, None);
    }

    #[tokio::test]
    async fn empty_destination_is_rejected() {
        let routing = routing();
        let planner = RoutePlanner::new(&routing, PlannerConfig::default());

        let request = PlanRequest::new(Coord::new(40.0, -3.2), "   ", FuelType::Petrol95);
        let err = planner.plan(&request, &[], monday_ten()).await.unwrap_err();

        assert!(matches!(err, PlanError::EmptyDestination));
    }

    #[tokio::test]
    async fn non_finite_origin_is_rejected() {
        let routing = routing();
        let planner = RoutePlanner::new(&routing, PlannerConfig::default());

        let request = PlanRequest::new(Coord::new(f64::NAN, -3.2), "Madrid", FuelType::Petrol95);
        let err = planner.plan(&request, &[], monday_ten()).await.unwrap_err();

        assert!(matches!(err, PlanError::InvalidOrigin));
    }

    #[tokio::test]
    async fn unresolvable_destination_maps_to_geocoding_error() {
        let routing = MockRouting::new();
        let planner = RoutePlanner::new(&routing, PlannerConfig::default());

        let err = planner.plan(&request(), &[], monday_ten()).await.unwrap_err();

        assert!(matches!(
            err,
            PlanError::Geocoding(RoutingError::NoGeocodeMatch { .. })
        ));
    }

    #[tokio::test]
    async fn missing_route_maps_to_routing_error() {
        let routing = MockRouting::new().with_geocoded(GeocodedPlace {
            coord: Coord::new(40.0, -3.0),
            label: "Guadalajara".to_string(),
        });
        let planner = RoutePlanner::new(&routing, PlannerConfig::default());

        let err = planner.plan(&request(), &[], monday_ten()).await.unwrap_err();

        assert!(matches!(err, PlanError::Routing(RoutingError::NoRoute)));
    }
}
