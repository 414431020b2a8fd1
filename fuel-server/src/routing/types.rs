//! Mapbox API response types.
//!
//! Only the fields the planner consumes are modeled; everything else in
//! the responses is ignored during deserialization.

use serde::Deserialize;

/// Directions API response wrapper.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

/// A single route alternative.
#[derive(Debug, Deserialize)]
pub struct RouteDto {
    pub geometry: GeometryDto,
    /// Route length in meters.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

/// GeoJSON LineString geometry; positions are `[lng, lat]`.
#[derive(Debug, Deserialize)]
pub struct GeometryDto {
    pub coordinates: Vec<[f64; 2]>,
}

/// One leg of a route (between consecutive waypoints).
#[derive(Debug, Deserialize)]
pub struct LegDto {
    /// Travel time in seconds.
    pub duration: f64,
}

/// Geocoding API response wrapper.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<FeatureDto>,
}

/// A geocoding match.
#[derive(Debug, Deserialize)]
pub struct FeatureDto {
    /// `[lng, lat]` of the representative point.
    pub center: [f64; 2],
    pub place_name: Option<String>,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_directions_response() {
        let json = r#"{
            "routes": [{
                "geometry": {"coordinates": [[-3.7, 40.4], [-3.6, 40.5]], "type": "LineString"},
                "distance": 15320.5,
                "duration": 1130.2,
                "legs": [{"duration": 420.0}, {"duration": 710.2}]
            }]
        }"#;

        let parsed: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.routes.len(), 1);
        assert_eq!(parsed.routes[0].geometry.coordinates.len(), 2);
        assert_eq!(parsed.routes[0].legs[0].duration, 420.0);
    }

    #[test]
    fn parse_empty_directions_response() {
        let parsed: DirectionsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.routes.is_empty());
    }

    #[test]
    fn parse_geocode_response() {
        let json = r#"{
            "features": [{
                "center": [-0.3763, 39.4699],
                "place_name": "Valencia, Spain",
                "text": "Valencia"
            }]
        }"#;

        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.features[0].center, [-0.3763, 39.4699]);
        assert_eq!(parsed.features[0].place_name.as_deref(), Some("Valencia, Spain"));
    }
}
