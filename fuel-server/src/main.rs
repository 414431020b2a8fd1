use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fuel_server::catalog::{CatalogClient, CatalogClientConfig, StationCatalog};
use fuel_server::planner::PlannerConfig;
use fuel_server::routing::{MapboxClient, MapboxConfig};
use fuel_server::web::{AppState, create_router};

/// How often to refresh the station catalog (24 hours).
const CATALOG_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get the Mapbox token from the environment
    let access_token = std::env::var("MAPBOX_TOKEN").unwrap_or_else(|_| {
        eprintln!("Warning: MAPBOX_TOKEN not set. Routing and geocoding calls will fail.");
        String::new()
    });

    // Create the Mapbox client
    let mapbox_config = MapboxConfig::new(&access_token);
    let mapbox_client = MapboxClient::new(mapbox_config).expect("Failed to create Mapbox client");

    // Create planner config
    let planner_config = PlannerConfig::default();

    // Fetch the station catalog (fail fast if unavailable)
    info!("fetching station catalog");
    let catalog_client =
        CatalogClient::new(CatalogClientConfig::default()).expect("Failed to create catalog client");
    let catalog = StationCatalog::fetch(catalog_client)
        .await
        .expect("Failed to fetch station catalog");
    info!(stations = catalog.len().await, "loaded station catalog");

    // Spawn background task to refresh the catalog daily
    let catalog_refresh = catalog.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CATALOG_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog_refresh.refresh().await {
                Ok(count) => info!(stations = count, "refreshed station catalog"),
                Err(e) => error!("failed to refresh station catalog: {e}"),
            }
        }
    });

    // Build app state
    let state = AppState::new(catalog, mapbox_client, planner_config);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("fuel route planner listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
