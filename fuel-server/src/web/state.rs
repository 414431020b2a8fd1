//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::StationCatalog;
use crate::planner::PlannerConfig;
use crate::routing::MapboxClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog, refreshed in the background
    pub catalog: StationCatalog,

    /// Mapbox routing and geocoding client
    pub routing: Arc<MapboxClient>,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: StationCatalog, routing: MapboxClient, config: PlannerConfig) -> Self {
        Self {
            catalog,
            routing: Arc::new(routing),
            config: Arc::new(config),
        }
    }
}
