//! Planner configuration.

/// Tunable parameters for the station planner.
///
/// Radii are call-time parameters of the filters and comparators, not
/// baked-in constants; these are just the operator-facing defaults.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Corridor half-width around the route, in kilometres.
    pub corridor_radius_km: f64,

    /// Search radius for the nearest/cheapest flows, in kilometres.
    pub search_radius_km: f64,

    /// Maximum number of stations in the nearest listing.
    pub nearest_limit: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(corridor_radius_km: f64, search_radius_km: f64, nearest_limit: usize) -> Self {
        Self {
            corridor_radius_km,
            search_radius_km,
            nearest_limit,
        }
    }

    /// Set the corridor radius.
    pub fn with_corridor_radius(mut self, km: f64) -> Self {
        self.corridor_radius_km = km;
        self
    }

    /// Set the search radius.
    pub fn with_search_radius(mut self, km: f64) -> Self {
        self.search_radius_km = km;
        self
    }

    /// Set the nearest-listing limit.
    pub fn with_nearest_limit(mut self, limit: usize) -> Self {
        self.nearest_limit = limit;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            corridor_radius_km: 1.0,
            search_radius_km: 5.0,
            nearest_limit: 10,
        }
    }
}
