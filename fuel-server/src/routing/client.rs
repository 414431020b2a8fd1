//! Mapbox Directions and Geocoding HTTP client.
//!
//! Provides the route, per-station duration and geocoding lookups the
//! planner needs. A semaphore caps concurrent requests so the fan-out
//! enrichment stays within Mapbox rate limits.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::warn;

use crate::domain::{Coord, GeocodedPlace, Route};
use crate::planner::{Geocoder, RoutingProvider};

use super::error::RoutingError;
use super::types::{DirectionsResponse, GeocodeResponse, RouteDto};

/// Default base URL for the Mapbox API.
const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the Mapbox client.
#[derive(Debug, Clone)]
pub struct MapboxConfig {
    /// Access token sent with every request
    pub access_token: String,
    /// Base URL for the API (defaults to production Mapbox)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapboxConfig {
    /// Create a new config with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Mapbox API client.
///
/// Uses a semaphore to limit concurrent requests: the enrichment step
/// fans out one directions lookup per corridor station.
#[derive(Debug, Clone)]
pub struct MapboxClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    semaphore: Arc<Semaphore>,
}

impl MapboxClient {
    /// Create a new Mapbox client with the given configuration.
    pub fn new(config: MapboxConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            access_token: config.access_token,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Geocode a free-text place query to its best match in Spain.
    pub async fn geocode_place(&self, query: &str) -> Result<GeocodedPlace, RoutingError> {
        let _permit = self.acquire().await?;

        let url = format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url, query
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("limit", "1"),
                ("country", "es"),
            ])
            .send()
            .await?;

        let body = read_body(response).await?;

        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?;

        let feature = parsed
            .features
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::NoGeocodeMatch {
                query: query.to_string(),
            })?;

        let label = feature
            .place_name
            .or(feature.text)
            .unwrap_or_else(|| query.to_string());

        Ok(GeocodedPlace {
            coord: Coord::from_lng_lat(feature.center),
            label,
        })
    }

    /// Driving route between two points, with traffic.
    pub async fn route_between(
        &self,
        origin: Coord,
        destination: Coord,
    ) -> Result<Route, RoutingError> {
        let route = self
            .directions("driving-traffic", &[origin, destination])
            .await?;

        Ok(Route {
            geometry: route
                .geometry
                .coordinates
                .into_iter()
                .map(Coord::from_lng_lat)
                .collect(),
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }

    /// Travel time of the first leg of origin → waypoint → destination,
    /// in seconds.
    pub async fn duration_via_waypoint(
        &self,
        origin: Coord,
        waypoint: Coord,
        destination: Coord,
    ) -> Result<f64, RoutingError> {
        let route = self
            .directions("driving", &[origin, waypoint, destination])
            .await?;

        let leg = route.legs.first().ok_or(RoutingError::EmptyRoute)?;
        Ok(leg.duration)
    }

    /// Driving duration origin → target, in seconds.
    ///
    /// Soft lookup: any failure is logged and collapsed to `None`.
    pub async fn duration_between(&self, origin: Coord, target: Coord) -> Option<f64> {
        match self.directions("driving", &[origin, target]).await {
            Ok(route) => Some(route.duration),
            Err(e) => {
                warn!(error = %e, "duration lookup failed");
                None
            }
        }
    }

    /// Fetch the best route from the Directions API for the given profile
    /// and waypoint sequence.
    async fn directions(
        &self,
        profile: &str,
        waypoints: &[Coord],
    ) -> Result<RouteDto, RoutingError> {
        let _permit = self.acquire().await?;

        let path: Vec<String> = waypoints
            .iter()
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect();

        let url = format!(
            "{}/directions/v5/mapbox/{}/{}",
            self.base_url,
            profile,
            path.join(";")
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("geometries", "geojson"),
                ("overview", "full"),
            ])
            .send()
            .await?;

        let body = read_body(response).await?;

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?;

        parsed
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRoute)
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, RoutingError> {
        self.semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })
    }
}

/// Map the HTTP status to an error, or return the response body.
async fn read_body(response: reqwest::Response) -> Result<String, RoutingError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(RoutingError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RoutingError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RoutingError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

impl RoutingProvider for MapboxClient {
    async fn route_between(&self, origin: Coord, destination: Coord) -> Result<Route, RoutingError> {
        MapboxClient::route_between(self, origin, destination).await
    }

    async fn duration_via_waypoint(
        &self,
        origin: Coord,
        waypoint: Coord,
        destination: Coord,
    ) -> Result<f64, RoutingError> {
        MapboxClient::duration_via_waypoint(self, origin, waypoint, destination).await
    }

    async fn duration_between(&self, origin: Coord, target: Coord) -> Option<f64> {
        MapboxClient::duration_between(self, origin, target).await
    }
}

impl Geocoder for MapboxClient {
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, RoutingError> {
        self.geocode_place(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = MapboxConfig::new("pk.test")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.access_token, "pk.test");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = MapboxConfig::new("pk.test");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = MapboxClient::new(MapboxConfig::new("pk.test"));
        assert!(client.is_ok());
    }
}
