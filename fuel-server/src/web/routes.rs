//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::cors::CorsLayer;

use crate::domain::Coord;
use crate::planner::{
    PlanError, PlanRequest, RoutePlanner, available_brands, cheapest_station, nearest_stations,
    stations_with_distance,
};
use crate::routing::RoutingError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations/nearest", get(nearest))
        .route("/stations/cheapest", get(cheapest))
        .route("/route/plan", post(plan_route))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn parse_position(lat: f64, lng: f64) -> Result<Coord, AppError> {
    let coord = Coord::new(lat, lng);
    if !coord.is_finite() {
        return Err(AppError::BadRequest {
            message: "lat and lng must be finite coordinates".to_string(),
        });
    }
    Ok(coord)
}

/// List stations nearest to a position, with the brands present among
/// them.
async fn nearest(
    State(state): State<AppState>,
    Query(req): Query<NearestRequest>,
) -> Result<Json<NearestResponse>, AppError> {
    let origin = parse_position(req.lat, req.lng)?;
    let limit = req.limit.unwrap_or(state.config.nearest_limit).min(50);

    let snapshot = state.catalog.snapshot().await;
    let annotated = stations_with_distance(&snapshot, origin);

    // Brands are selectable filters, so they come from the full candidate
    // set, not from the filtered and truncated result list.
    let brands = available_brands(&annotated);
    let nearest = nearest_stations(&annotated, req.brand.as_deref(), limit);

    Ok(Json(NearestResponse {
        brands,
        stations: nearest.iter().map(StationResult::from).collect(),
    }))
}

/// Find the cheapest station within a radius of the position.
async fn cheapest(
    State(state): State<AppState>,
    Query(req): Query<CheapestRequest>,
) -> Result<Json<CheapestResponse>, AppError> {
    let origin = parse_position(req.lat, req.lng)?;
    let radius_km = req.radius_km.unwrap_or(state.config.search_radius_km);
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(AppError::BadRequest {
            message: "radius_km must be a positive number".to_string(),
        });
    }

    let snapshot = state.catalog.snapshot().await;
    let annotated = stations_with_distance(&snapshot, origin);

    let winner = cheapest_station(
        state.routing.as_ref(),
        &annotated,
        origin,
        req.fuel,
        req.brand.as_deref(),
        radius_km,
        Local::now(),
    )
    .await;

    Ok(Json(CheapestResponse {
        station: winner.as_ref().map(CheapestResult::from),
    }))
}

/// Plan fuel stops along a route to a geocoded destination.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<PlanRouteRequest>,
) -> Result<Json<PlanRouteResponse>, AppError> {
    let origin = parse_position(req.lat, req.lng)?;

    let mut config = (*state.config).clone();
    if let Some(corridor_km) = req.corridor_km {
        if !(corridor_km.is_finite() && corridor_km > 0.0) {
            return Err(AppError::BadRequest {
                message: "corridor_km must be a positive number".to_string(),
            });
        }
        config = config.with_corridor_radius(corridor_km);
    }

    let snapshot = state.catalog.snapshot().await;
    let annotated = stations_with_distance(&snapshot, origin);

    let request = PlanRequest::new(origin, req.destination, req.fuel);
    let planner = RoutePlanner::new(state.routing.as_ref(), config);
    let result = planner.plan(&request, &annotated, Local::now()).await?;

    Ok(Json(PlanRouteResponse {
        destination: DestinationResult::from(&result.destination),
        route: RouteSummary::from(&result.route),
        stations: result.stations.iter().map(RouteStationResult::from).collect(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::EmptyDestination | PlanError::InvalidOrigin => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::Geocoding(RoutingError::NoGeocodeMatch { .. }) => AppError::NotFound {
                message: e.to_string(),
            },
            PlanError::Geocoding(_) | PlanError::Routing(_) => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::warn!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
