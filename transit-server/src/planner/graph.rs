//! Stop adjacency graph built from route definitions.
//!
//! Adjacency ignores the direction a route is published in: each pair of
//! consecutive stops is linked both ways. Stops shared by several routes
//! also carry self-loop transfer edges, one per pair of routes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::domain::{Route, RouteId, StopId};

/// An edge out of a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Stop reached by following this edge.
    #[serde(rename = "stop")]
    pub to: StopId,

    /// Route the edge belongs to.
    #[serde(rename = "routeId")]
    pub route_id: RouteId,

    /// Self-loop meaning "change onto `route_id` here".
    #[serde(rename = "isTransfer", default, skip_serializing_if = "is_false")]
    pub is_transfer: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Edge {
    fn ride(to: StopId, route_id: RouteId) -> Self {
        Self {
            to,
            route_id,
            is_transfer: false,
        }
    }

    fn transfer(at: StopId, route_id: RouteId) -> Self {
        Self {
            to: at,
            route_id,
            is_transfer: true,
        }
    }
}

/// Adjacency structure over stops.
///
/// Immutable once built. Serializes to a JSON object mapping stop id to its
/// edge list, with keys sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: HashMap<StopId, Vec<Edge>>,
}

impl Graph {
    /// Build the graph for a route collection.
    ///
    /// Every stop named by any route gets an entry, even if it has no edges.
    /// Transfer edges at a shared stop are added once per unordered route
    /// pair, tagged with the later route in collection order.
    pub fn build(routes: &[Route]) -> Self {
        let mut adjacency: HashMap<StopId, Vec<Edge>> = HashMap::new();
        // Routes serving each stop, in collection order, each route once.
        let mut serving: HashMap<&StopId, Vec<usize>> = HashMap::new();

        for (idx, route) in routes.iter().enumerate() {
            for stop in &route.stops {
                adjacency.entry(stop.clone()).or_default();
                let list = serving.entry(stop).or_default();
                if list.last() != Some(&idx) {
                    list.push(idx);
                }
            }
        }

        for route in routes {
            for pair in route.stops.windows(2) {
                let (from, to) = (&pair[0], &pair[1]);
                adjacency
                    .entry(from.clone())
                    .or_default()
                    .push(Edge::ride(to.clone(), route.id.clone()));
                adjacency
                    .entry(to.clone())
                    .or_default()
                    .push(Edge::ride(from.clone(), route.id.clone()));
            }
        }

        let mut transfers = 0;
        for (stop, route_indices) in &serving {
            let edges = adjacency.entry((*stop).clone()).or_default();
            for (i, _) in route_indices.iter().enumerate() {
                for &j in &route_indices[i + 1..] {
                    edges.push(Edge::transfer((*stop).clone(), routes[j].id.clone()));
                    transfers += 1;
                }
            }
        }

        let graph = Self { adjacency };
        debug!(
            stops = graph.stop_count(),
            edges = graph.edge_count(),
            transfers,
            "built stop graph"
        );
        graph
    }

    /// Edges out of `stop`, in insertion order. Empty for unknown stops.
    pub fn edges(&self, stop: &StopId) -> &[Edge] {
        self.adjacency.get(stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if `stop` has an entry in the graph.
    pub fn contains(&self, stop: &StopId) -> bool {
        self.adjacency.contains_key(stop)
    }

    /// Returns true if `from` and `to` are adjacent on `route` by a ride
    /// edge (not a transfer).
    pub fn has_ride(&self, from: &StopId, to: &StopId, route: &RouteId) -> bool {
        self.edges(from)
            .iter()
            .any(|e| &e.to == to && &e.route_id == route && !e.is_transfer)
    }

    /// Number of stops with an entry.
    pub fn stop_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of edges, transfers included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Iterates over every route id referenced by an edge.
    pub fn route_ids(&self) -> impl Iterator<Item = &RouteId> {
        self.adjacency.values().flatten().map(|e| &e.route_id)
    }
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&StopId, &Vec<Edge>> = self.adjacency.iter().collect();
        sorted.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let adjacency = HashMap::deserialize(deserializer)?;
        Ok(Self { adjacency })
    }
}
