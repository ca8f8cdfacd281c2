//! Itinerary resolution.
//!
//! Wires the direct-route check, path search, segment assembly and merging
//! together, and turns every failure into a [`ResolveError`].

use serde::Serialize;
use tracing::{debug, error};

use super::assemble::assemble;
use super::bfs::find_path;
use super::config::SearchConfig;
use super::direct::find_direct;
use super::graph::Graph;
use super::merge::merge_segments;
use crate::domain::{Route, RouteId, Segment, StopId, first_disjoint_boundary};

/// Error from itinerary resolution.
///
/// The display strings are shown to riders as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Origin or destination id was empty
    #[error("Start and destination stop IDs are required")]
    MissingStopId,

    /// Origin and destination are the same stop
    #[error("Start and destination cannot be the same")]
    SameStop,

    /// No route serves the origin or destination
    #[error("No valid routes found")]
    UnknownStop,

    /// The graph has no path between the stops
    #[error("No route found")]
    NoRouteFound,

    /// Assembled segments do not share boundary stops
    #[error("Segments do not join properly")]
    SegmentsDisjoint,

    /// The graph references a route missing from the route list
    #[error("Route {0} not found")]
    RouteMissing(RouteId),
}

impl ResolveError {
    /// Returns true for failures caused by inconsistent data or a bug,
    /// rather than by the request itself.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ResolveError::SegmentsDisjoint | ResolveError::RouteMissing(_)
        )
    }
}

/// Access to the route collection.
///
/// Route order matters: direct-route and merge lookups take the first match.
pub trait RouteCatalog {
    /// All routes, in collection order.
    fn routes(&self) -> &[Route];

    /// Look up a route by id.
    fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes().iter().find(|r| &r.id == id)
    }
}

impl RouteCatalog for [Route] {
    fn routes(&self) -> &[Route] {
        self
    }
}

impl RouteCatalog for Vec<Route> {
    fn routes(&self) -> &[Route] {
        self
    }
}

/// Outcome of a search in the shape presentation consumes.
///
/// Exactly one of `segments` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    segments: Option<Vec<Segment>>,
    error: Option<String>,
}

impl SearchResult {
    /// The itinerary, if the search succeeded.
    pub fn segments(&self) -> Option<&[Segment]> {
        self.segments.as_deref()
    }

    /// The rider-facing error message, if the search failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns true if an itinerary was found.
    pub fn is_found(&self) -> bool {
        self.segments.is_some()
    }
}

impl From<Result<Vec<Segment>, ResolveError>> for SearchResult {
    fn from(outcome: Result<Vec<Segment>, ResolveError>) -> Self {
        match outcome {
            Ok(segments) => Self {
                segments: Some(segments),
                error: None,
            },
            Err(e) => Self {
                segments: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Segment resolver over one network snapshot.
pub struct Resolver<'a, C: RouteCatalog + ?Sized> {
    catalog: &'a C,
    graph: &'a Graph,
    config: &'a SearchConfig,
}

impl<'a, C: RouteCatalog + ?Sized> Resolver<'a, C> {
    /// Create a new resolver.
    ///
    /// `graph` must have been built from (or be equivalent to) the routes
    /// in `catalog`.
    pub fn new(catalog: &'a C, graph: &'a Graph, config: &'a SearchConfig) -> Self {
        Self {
            catalog,
            graph,
            config,
        }
    }

    /// Resolve an itinerary and convert the outcome for presentation.
    pub fn resolve(&self, from: &str, to: &str) -> SearchResult {
        self.search(from, to).into()
    }

    /// Resolve an itinerary from `from` to `to`.
    ///
    /// On success the returned list is non-empty and each segment ends at
    /// the stop the next one starts from.
    pub fn search(&self, from: &str, to: &str) -> Result<Vec<Segment>, ResolveError> {
        let outcome = self.search_inner(from, to);
        match &outcome {
            Ok(segments) => {
                debug!(from, to, segments = segments.len(), "itinerary resolved")
            }
            Err(e) if e.is_internal() => {
                error!(from, to, error = %e, "itinerary resolution failed")
            }
            Err(e) => debug!(from, to, error = %e, "no itinerary"),
        }
        outcome
    }

    fn search_inner(&self, from: &str, to: &str) -> Result<Vec<Segment>, ResolveError> {
        if from.is_empty() || to.is_empty() {
            return Err(ResolveError::MissingStopId);
        }
        if from == to {
            return Err(ResolveError::SameStop);
        }

        let source = StopId::parse(from).map_err(|_| ResolveError::UnknownStop)?;
        let destination = StopId::parse(to).map_err(|_| ResolveError::UnknownStop)?;
        if !self.graph.contains(&source) || !self.graph.contains(&destination) {
            return Err(ResolveError::UnknownStop);
        }

        let routes = self.catalog.routes();
        if let Some(segment) = find_direct(routes, &source, &destination) {
            return Ok(vec![segment]);
        }

        let result = find_path(self.graph, &source, &destination);
        let path = result.path.ok_or(ResolveError::NoRouteFound)?;

        let segments = assemble(&path, self.graph, self.catalog)?;
        let segments = merge_segments(segments, routes, self.config);

        if segments.is_empty() {
            return Err(ResolveError::NoRouteFound);
        }
        if let Some(k) = first_disjoint_boundary(&segments) {
            error!(boundary = k, "segments {} and {} do not join", k, k + 1);
            return Err(ResolveError::SegmentsDisjoint);
        }

        Ok(segments)
    }
}
