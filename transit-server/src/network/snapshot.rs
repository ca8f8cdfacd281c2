//! Immutable network snapshot.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::error::NetworkError;
use crate::domain::{Route, RouteId, Stop, StopId};
use crate::planner::{Graph, Resolver, RouteCatalog, SearchConfig};

/// Stops, routes and the graph derived from them.
///
/// A snapshot is never modified. When the data changes a new snapshot is
/// built and swapped in (see [`super::NetworkHandle`]).
#[derive(Debug)]
pub struct Network {
    stops: Vec<Stop>,
    stop_index: HashMap<StopId, usize>,
    routes: Vec<Route>,
    route_index: HashMap<RouteId, usize>,
    graph: Graph,
    loaded_at: DateTime<Utc>,
}

impl Network {
    /// Build a snapshot, deriving the graph from `routes`.
    pub fn new(stops: Vec<Stop>, routes: Vec<Route>) -> Result<Self, NetworkError> {
        let graph = Graph::build(&routes);
        Self::build(stops, routes, graph)
    }

    /// Build a snapshot around a precomputed graph.
    ///
    /// The graph must only reference routes present in `routes`.
    pub fn with_graph(
        stops: Vec<Stop>,
        routes: Vec<Route>,
        graph: Graph,
    ) -> Result<Self, NetworkError> {
        let network = Self::build(stops, routes, graph)?;
        if let Some(unknown) = network
            .graph
            .route_ids()
            .find(|id| !network.route_index.contains_key(*id))
        {
            return Err(NetworkError::UnknownGraphRoute(unknown.clone()));
        }
        Ok(network)
    }

    fn build(stops: Vec<Stop>, routes: Vec<Route>, graph: Graph) -> Result<Self, NetworkError> {
        let mut stop_index = HashMap::with_capacity(stops.len());
        for (idx, stop) in stops.iter().enumerate() {
            match stop_index.entry(stop.id.clone()) {
                Entry::Occupied(_) => return Err(NetworkError::DuplicateStop(stop.id.clone())),
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
        }

        let mut route_index = HashMap::with_capacity(routes.len());
        for (idx, route) in routes.iter().enumerate() {
            if route.stops.is_empty() {
                return Err(NetworkError::EmptyRoute(route.id.clone()));
            }
            match route_index.entry(route.id.clone()) {
                Entry::Occupied(_) => return Err(NetworkError::DuplicateRoute(route.id.clone())),
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
            for stop in &route.stops {
                if !stop_index.contains_key(stop) {
                    warn!(
                        route = %route.id,
                        stop = %stop,
                        "route calls at a stop missing from the stop list"
                    );
                }
            }
        }

        info!(
            stops = stops.len(),
            routes = routes.len(),
            graph_stops = graph.stop_count(),
            graph_edges = graph.edge_count(),
            "network snapshot ready"
        );

        Ok(Self {
            stops,
            stop_index,
            routes,
            route_index,
            graph,
            loaded_at: Utc::now(),
        })
    }

    /// A resolver over this snapshot.
    pub fn resolver<'a>(&'a self, config: &'a SearchConfig) -> Resolver<'a, Network> {
        Resolver::new(self, &self.graph, config)
    }

    /// The stop graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// When this snapshot was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// All stops, in dataset order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Look up a stop by id.
    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stop_index.get(id).map(|&idx| &self.stops[idx])
    }

    /// Stops along a route, in route order.
    ///
    /// Stops missing from the stop list are skipped. Returns `None` for an
    /// unknown route.
    pub fn stops_on_route(&self, id: &RouteId) -> Option<Vec<&Stop>> {
        let route = self.route(id)?;
        Some(route.stops.iter().filter_map(|s| self.stop(s)).collect())
    }

    /// Routes calling at `stop`, in collection order.
    pub fn routes_serving(&self, stop: &StopId) -> Vec<&Route> {
        self.routes.iter().filter(|r| r.serves(stop)).collect()
    }

    /// Stops whose name or id contains `query`, ignoring case.
    ///
    /// Names starting with the query come first; ties keep dataset order.
    pub fn search_stops(&self, query: &str, limit: usize) -> Vec<&Stop> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(bool, &Stop)> = self
            .stops
            .iter()
            .filter_map(|stop| {
                let name = stop.name.to_lowercase();
                let id = stop.id.as_str().to_lowercase();
                if name.starts_with(&needle) {
                    Some((true, stop))
                } else if name.contains(&needle) || id.contains(&needle) {
                    Some((false, stop))
                } else {
                    None
                }
            })
            .collect();
        matches.sort_by_key(|(prefix, _)| !prefix);
        matches
            .into_iter()
            .take(limit)
            .map(|(_, stop)| stop)
            .collect()
    }

    /// The stop nearest to a coordinate, by planar degree distance.
    pub fn closest_stop(&self, lat: f64, lng: f64) -> Option<&Stop> {
        let key = |stop: &Stop| stop.squared_degree_distance(lat, lng);
        self.stops.iter().min_by(|a, b| key(a).total_cmp(&key(b)))
    }

    /// Stops within `radius_km` of a coordinate, nearest first.
    pub fn stops_within(&self, lat: f64, lng: f64, radius_km: f64) -> Vec<(&Stop, f64)> {
        let mut nearby: Vec<(&Stop, f64)> = self
            .stops
            .iter()
            .map(|stop| (stop, stop.distance_km(lat, lng)))
            .filter(|(_, d)| *d <= radius_km)
            .collect();
        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        nearby
    }
}

impl RouteCatalog for Network {
    fn routes(&self) -> &[Route] {
        &self.routes
    }

    fn route(&self, id: &RouteId) -> Option<&Route> {
        self.route_index.get(id).map(|&idx| &self.routes[idx])
    }
}
