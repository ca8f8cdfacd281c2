//! Direct-route check.
//!
//! Before searching the graph, look for a single route that already runs
//! from origin to destination in its published direction.

use crate::domain::{Route, Segment, StopId};

/// Find the first route (in collection order) that calls at `from` before
/// `to`, and return the ride between them as one segment.
///
/// Only the first occurrence of each stop on a route is considered. No
/// attempt is made to pick the shortest of several candidate routes.
pub fn find_direct(routes: &[Route], from: &StopId, to: &StopId) -> Option<Segment> {
    routes.iter().find_map(|route| {
        route
            .slice_between(from, to)
            .map(|stops| Segment::on_route(route, stops.to_vec()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;

    fn sid(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn route(id: &str, stops: &[&str]) -> Route {
        Route::new(
            RouteId::parse(id).unwrap(),
            id.to_uppercase(),
            "#000",
            stops.iter().map(|s| sid(s)).collect(),
        )
    }

    #[test]
    fn finds_forward_slice() {
        let routes = vec![route("R1", &["A", "B", "C", "D"])];
        let seg = find_direct(&routes, &sid("B"), &sid("D")).unwrap();
        assert_eq!(seg.route_id.as_str(), "R1");
        assert_eq!(seg.stops, vec![sid("B"), sid("C"), sid("D")]);
    }

    #[test]
    fn ignores_reverse_direction() {
        let routes = vec![route("R1", &["A", "B", "C", "D"])];
        assert!(find_direct(&routes, &sid("D"), &sid("A")).is_none());
    }

    #[test]
    fn first_matching_route_wins() {
        let routes = vec![
            route("long", &["A", "P", "Q", "R", "B"]),
            route("short", &["A", "B"]),
        ];
        let seg = find_direct(&routes, &sid("A"), &sid("B")).unwrap();
        assert_eq!(seg.route_id.as_str(), "long");
        assert_eq!(seg.stops.len(), 5);
    }

    #[test]
    fn skips_routes_in_wrong_direction() {
        let routes = vec![route("back", &["B", "A"]), route("fwd", &["A", "B"])];
        let seg = find_direct(&routes, &sid("A"), &sid("B")).unwrap();
        assert_eq!(seg.route_id.as_str(), "fwd");
    }

    #[test]
    fn none_when_no_route_serves_both() {
        let routes = vec![route("R1", &["A", "B"]), route("R2", &["C", "D"])];
        assert!(find_direct(&routes, &sid("A"), &sid("D")).is_none());
    }
}
