//! Geographic coordinate type.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair, in degrees.
///
/// Construction does not validate: the catalog can carry garbage numbers,
/// and distance computations return `None` for non-finite components
/// instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

impl Coord {
    /// Create a coordinate from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from a GeoJSON position (`[lng, lat]` order).
    pub fn from_lng_lat(position: [f64; 2]) -> Self {
        Self {
            lat: position[1],
            lng: position[0],
        }
    }

    /// True when both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lng_lat_swaps_order() {
        let coord = Coord::from_lng_lat([-3.7038, 40.4168]);
        assert_eq!(coord.lat, 40.4168);
        assert_eq!(coord.lng, -3.7038);
    }

    #[test]
    fn finiteness() {
        assert!(Coord::new(40.0, -3.0).is_finite());
        assert!(!Coord::new(f64::NAN, -3.0).is_finite());
        assert!(!Coord::new(40.0, f64::INFINITY).is_finite());
    }
}
