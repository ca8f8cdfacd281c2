//! Breadth-first path search over the stop graph.
//!
//! States are `(stop, route)` pairs rather than bare stops, so a stop that
//! was already reached on one route can still be reached again on another.
//! Among equally short paths, continuing on the current route is tried
//! before switching.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use super::graph::{Edge, Graph};
use crate::domain::{RouteId, StopId};

/// One node of a discovered path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    /// Stop reached.
    pub stop: StopId,

    /// Route used to arrive at `stop`. `None` only for the origin.
    pub route_id: Option<RouteId>,
}

impl PathStep {
    /// The first step of every path.
    pub fn origin(stop: StopId) -> Self {
        Self {
            stop,
            route_id: None,
        }
    }
}

/// Result of a path search.
#[derive(Debug, Clone)]
pub struct BfsResult {
    /// Fewest-hop path from source to destination, if one exists.
    pub path: Option<Vec<PathStep>>,

    /// Number of states dequeued.
    pub expanded: usize,
}

/// A discovered state with a link back to the state it was reached from.
struct Node {
    step: PathStep,
    parent: Option<usize>,
}

/// Visited-set key: the stop together with the route used to reach it.
type StateKey = (StopId, Option<RouteId>);

/// Search `graph` for a path from `source` to `destination`.
///
/// A state is marked visited when it is enqueued. The search stops as soon
/// as a state at `destination` is dequeued, which gives a path with the
/// fewest edges; it does not guarantee the fewest route changes.
pub fn find_path(graph: &Graph, source: &StopId, destination: &StopId) -> BfsResult {
    let mut nodes: Vec<Node> = vec![Node {
        step: PathStep::origin(source.clone()),
        parent: None,
    }];
    let mut queue: VecDeque<usize> = VecDeque::from([0]);
    let mut visited: HashSet<StateKey> = HashSet::from([(source.clone(), None)]);
    let mut expanded = 0;

    while let Some(idx) = queue.pop_front() {
        expanded += 1;

        if &nodes[idx].step.stop == destination {
            let path = reconstruct(&nodes, idx);
            debug!(hops = path.len() - 1, expanded, "path found");
            return BfsResult {
                path: Some(path),
                expanded,
            };
        }

        let current_stop = nodes[idx].step.stop.clone();
        let current_route = nodes[idx].step.route_id.clone();

        let mut neighbors: Vec<&Edge> = graph.edges(&current_stop).iter().collect();
        // Stable: edges continuing the current ride go first, others keep
        // their insertion order.
        neighbors.sort_by_key(|e| !continues(e, current_route.as_ref()));

        trace!(
            stop = %current_stop,
            route = ?current_route,
            neighbors = neighbors.len(),
            "expanding"
        );

        for edge in neighbors {
            let key = (edge.to.clone(), Some(edge.route_id.clone()));
            if !visited.insert(key) {
                continue;
            }
            nodes.push(Node {
                step: PathStep {
                    stop: edge.to.clone(),
                    route_id: Some(edge.route_id.clone()),
                },
                parent: Some(idx),
            });
            queue.push_back(nodes.len() - 1);
        }
    }

    debug!(expanded, "search space exhausted");
    BfsResult {
        path: None,
        expanded,
    }
}

/// True if following `edge` keeps riding the route we arrived on.
fn continues(edge: &Edge, current_route: Option<&RouteId>) -> bool {
    !edge.is_transfer && Some(&edge.route_id) == current_route
}

fn reconstruct(nodes: &[Node], mut idx: usize) -> Vec<PathStep> {
    let mut path = vec![nodes[idx].step.clone()];
    while let Some(parent) = nodes[idx].parent {
        path.push(nodes[parent].step.clone());
        idx = parent;
    }
    path.reverse();
    path
}
