//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{RouteId, StopId};
use crate::planner::{RouteCatalog, SearchResult};

use super::dto::*;
use super::state::AppState;

const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 50;
const DEFAULT_RADIUS_KM: f64 = 1.0;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/network", get(network_info))
        .route("/api/stops/search", get(search_stops))
        .route("/api/stops/nearest", get(nearest_stop))
        .route("/api/stops/nearby", get(nearby_stops))
        .route("/api/stops/:id/routes", get(stop_routes))
        .route("/api/routes/:id", get(route_detail))
        .route("/api/search", get(search_itinerary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Snapshot statistics.
async fn network_info(State(state): State<AppState>) -> Json<NetworkInfoResponse> {
    let network = state.network.current().await;
    Json(NetworkInfoResponse::from_network(&network))
}

/// Search stops by name or id.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let requested = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let limit = requested.min(MAX_SEARCH_LIMIT);
    let network = state.network.current().await;

    let stops = network
        .search_stops(&req.q, limit)
        .into_iter()
        .map(StopResult::from_stop)
        .collect();

    Json(StopSearchResponse { stops })
}

/// The stop closest to a coordinate.
async fn nearest_stop(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<StopResult>, AppError> {
    check_coordinates(req.lat, req.lng)?;
    let network = state.network.current().await;

    network
        .closest_stop(req.lat, req.lng)
        .map(|stop| Json(StopResult::from_stop(stop)))
        .ok_or_else(|| AppError::NotFound {
            message: "No stops loaded".to_string(),
        })
}

/// Stops within a radius of a coordinate, nearest first.
async fn nearby_stops(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<NearbyResponse>, AppError> {
    check_coordinates(req.lat, req.lng)?;
    let radius = req.radius_km.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius.is_finite() || radius < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {radius}"),
        });
    }

    let network = state.network.current().await;
    let stops = network
        .stops_within(req.lat, req.lng, radius)
        .into_iter()
        .map(|(stop, distance_km)| NearbyStopResult {
            stop: StopResult::from_stop(stop),
            distance_km,
        })
        .collect();

    Ok(Json(NearbyResponse { stops }))
}

/// Routes serving a stop.
async fn stop_routes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoutesResponse>, AppError> {
    let stop_id = StopId::parse(&id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let network = state.network.current().await;

    if network.stop(&stop_id).is_none() && !network.graph().contains(&stop_id) {
        return Err(AppError::NotFound {
            message: format!("Stop {stop_id} not found"),
        });
    }

    let routes = network
        .routes_serving(&stop_id)
        .into_iter()
        .map(RouteSummary::from_route)
        .collect();

    Ok(Json(RoutesResponse { routes }))
}

/// Full details for one route.
async fn route_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let route_id = RouteId::parse(&id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let network = state.network.current().await;

    let not_found = || AppError::NotFound {
        message: format!("Route {route_id} not found"),
    };
    let route = network.route(&route_id).ok_or_else(not_found)?;
    let stops = network.stops_on_route(&route_id).ok_or_else(not_found)?;

    Ok(Json(RouteDetailResponse::from_route(route, &stops)))
}

/// Resolve an itinerary between two stops.
///
/// Resolver outcomes, including "no route", are returned with status 200 in
/// the `{segments, error}` shape.
async fn search_itinerary(
    State(state): State<AppState>,
    Query(req): Query<PlanRequest>,
) -> Result<Json<SearchResult>, AppError> {
    let network = state.network.current().await;
    let config = state.config.clone();

    let result = tokio::task::spawn_blocking(move || {
        network.resolver(&config).resolve(&req.from, &req.to)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Search task failed: {e}"),
    })?;

    Ok(Json(result))
}

fn check_coordinates(lat: f64, lng: f64) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::BadRequest {
            message: format!("Invalid coordinates: {lat}, {lng}"),
        });
    }
    Ok(())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
