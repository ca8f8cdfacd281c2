//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Route, Stop};
use crate::network::Network;
use crate::planner::RouteCatalog;

/// Query for an itinerary search.
#[derive(Debug, Default, Deserialize)]
pub struct PlanRequest {
    /// Origin stop id
    #[serde(default)]
    pub from: String,

    /// Destination stop id
    #[serde(default)]
    pub to: String,
}

/// Query for stop name search.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Search text (matched against stop names and ids)
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Query for stops near a coordinate.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    pub lat: f64,
    pub lng: f64,

    /// Search radius in kilometres (default 1)
    pub radius_km: Option<f64>,
}

/// A stop in responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.clone(),
            lat: stop.lat,
            lng: stop.lng,
        }
    }
}

/// Response for stop search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<StopResult>,
}

/// A stop with its distance from the query point.
#[derive(Debug, Serialize)]
pub struct NearbyStopResult {
    #[serde(flatten)]
    pub stop: StopResult,

    pub distance_km: f64,
}

/// Response for nearby-stop search.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub stops: Vec<NearbyStopResult>,
}

/// Short route listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub id: String,
    pub name: String,
    pub line_color: String,
    pub verified: bool,
}

impl RouteSummary {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.to_string(),
            name: route.name.clone(),
            line_color: route.line_color.clone(),
            verified: route.verified,
        }
    }
}

/// Response listing routes.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteSummary>,
}

/// Full route details.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDetailResponse {
    pub id: String,
    pub name: String,
    pub line_color: String,
    pub verified: bool,
    pub operator: Vec<String>,

    /// Stops in route order (stops missing from the stop list are omitted)
    pub stops: Vec<StopResult>,

    /// e.g. "1 hour 5 mins"
    pub duration: Option<String>,

    /// e.g. "12.5 km"
    pub distance: Option<String>,

    /// Number of buses running the route
    pub bus_count: Option<u32>,
}

impl RouteDetailResponse {
    /// Create from a domain Route and its resolved stops.
    pub fn from_route(route: &Route, stops: &[&Stop]) -> Self {
        let details = route.details.as_ref();
        Self {
            id: route.id.to_string(),
            name: route.name.clone(),
            line_color: route.line_color.clone(),
            verified: route.verified,
            operator: route.operator.clone(),
            stops: stops.iter().map(|s| StopResult::from_stop(s)).collect(),
            duration: details.and_then(|d| d.duration_text()),
            distance: details.and_then(|d| d.distance_text()),
            bus_count: details.and_then(|d| d.total_bus),
        }
    }
}

/// Snapshot statistics.
#[derive(Debug, Serialize)]
pub struct NetworkInfoResponse {
    pub stops: usize,
    pub routes: usize,
    pub graph_stops: usize,
    pub graph_edges: usize,
    pub loaded_at: DateTime<Utc>,
}

impl NetworkInfoResponse {
    /// Create from a snapshot.
    pub fn from_network(network: &Network) -> Self {
        Self {
            stops: network.stops().len(),
            routes: network.routes().len(),
            graph_stops: network.graph().stop_count(),
            graph_edges: network.graph().edge_count(),
            loaded_at: network.loaded_at(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
