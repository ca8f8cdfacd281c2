//! Turning a stop path into route segments.
//!
//! A path step only says which route was used to reach each stop. The
//! assembler groups consecutive steps into rides and starts a new segment
//! wherever the rider actually has to change.

use super::bfs::PathStep;
use super::graph::Graph;
use super::search::{ResolveError, RouteCatalog};
use crate::domain::{RouteId, Segment, StopId};

/// Group `path` into per-route segments.
///
/// A boundary is placed where the route id changes and the previous stop is
/// not linked to the current one by a ride edge on the previous route. When
/// the ids change but such a ride edge exists, the ride continues and the
/// segment takes the newer route id.
///
/// Stops are kept in the order walked, which can be the reverse of the
/// route's published order.
///
/// # Errors
///
/// Returns [`ResolveError::RouteMissing`] if a segment's route is not in
/// `catalog`.
pub fn assemble<C: RouteCatalog + ?Sized>(
    path: &[PathStep],
    graph: &Graph,
    catalog: &C,
) -> Result<Vec<Segment>, ResolveError> {
    let Some(origin) = path.first() else {
        return Ok(Vec::new());
    };

    let mut segments = Vec::new();
    let mut current_stops: Vec<StopId> = vec![origin.stop.clone()];
    let mut current_route: Option<&RouteId> = None;

    for pair in path.windows(2) {
        let (prev, step) = (&pair[0], &pair[1]);

        if let (Some(riding), Some(next_route)) = (current_route, step.route_id.as_ref())
            && riding != next_route
            && !graph.has_ride(&prev.stop, &step.stop, riding)
        {
            let boundary = prev.stop.clone();
            if current_stops.len() >= 2 {
                let stops = std::mem::replace(&mut current_stops, vec![boundary]);
                segments.push(close(catalog, riding, stops)?);
            } else {
                current_stops = vec![boundary];
            }
        }

        current_route = step.route_id.as_ref();
        // A transfer edge loops back to the same stop; it is recorded once,
        // not repeated.
        if current_stops.last() != Some(&step.stop) {
            current_stops.push(step.stop.clone());
        }
    }

    if current_stops.len() >= 2
        && let Some(route_id) = current_route
    {
        segments.push(close(catalog, route_id, current_stops)?);
    }

    Ok(segments)
}

fn close<C: RouteCatalog + ?Sized>(
    catalog: &C,
    route_id: &RouteId,
    stops: Vec<StopId>,
) -> Result<Segment, ResolveError> {
    let route = catalog
        .route(route_id)
        .ok_or_else(|| ResolveError::RouteMissing(route_id.clone()))?;
    Ok(Segment::on_route(route, stops))
}
