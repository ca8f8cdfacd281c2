//! Collapsing spurious route changes.
//!
//! The path search can switch route ids at a shared stop even when one
//! route covers the whole ride. Short segments are the symptom, so adjacent
//! pairs where either side is short are checked against the route list and
//! joined back into a single ride when some route runs through all of it.

use tracing::trace;

use super::config::SearchConfig;
use crate::domain::{Route, Segment, StopId};

/// Merge adjacent segments according to `config`.
///
/// Runs one left-to-right pass, or repeats until the segment count stops
/// shrinking when `merge_until_stable` is set.
pub fn merge_segments(
    segments: Vec<Segment>,
    routes: &[Route],
    config: &SearchConfig,
) -> Vec<Segment> {
    let mut segments = merge_pass(segments, routes, config.short_segment_max_stops);
    if !config.merge_until_stable {
        return segments;
    }
    loop {
        let before = segments.len();
        segments = merge_pass(segments, routes, config.short_segment_max_stops);
        if segments.len() == before {
            return segments;
        }
    }
}

/// One left-to-right pass over adjacent pairs.
///
/// A merged pair is consumed whole, so the merged segment is not compared
/// with the one after it in the same pass.
pub fn merge_pass(segments: Vec<Segment>, routes: &[Route], short_max: usize) -> Vec<Segment> {
    let mut merged = Vec::with_capacity(segments.len());
    let mut iter = segments.into_iter().peekable();

    while let Some(current) = iter.next() {
        if let Some(next) = iter.peek()
            && (current.stops.len() <= short_max || next.stops.len() <= short_max)
        {
            let combined = join_stops(&current.stops, &next.stops);
            if let Some(route) = routes.iter().find(|r| r.contains_run(&combined)) {
                trace!(
                    left = %current.route_id,
                    right = %next.route_id,
                    into = %route.id,
                    "merged segments"
                );
                merged.push(Segment::on_route(route, combined));
                iter.next();
                continue;
            }
        }
        merged.push(current);
    }

    merged
}

/// Concatenate two stop lists, dropping the shared boundary stop once.
fn join_stops(left: &[StopId], right: &[StopId]) -> Vec<StopId> {
    let mut combined = left.to_vec();
    if combined.last().is_some() && combined.last() == right.first() {
        combined.pop();
    }
    combined.extend_from_slice(right);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;

    fn sid(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn rid(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    fn route(id: &str, stops: &[&str]) -> Route {
        Route::new(
            rid(id),
            id.to_uppercase(),
            "#000",
            stops.iter().map(|s| sid(s)).collect(),
        )
    }

    fn seg(routes: &[Route], id: &str, stops: &[&str]) -> Segment {
        let r = routes.iter().find(|r| r.id.as_str() == id).unwrap();
        Segment::on_route(r, stops.iter().map(|s| sid(s)).collect())
    }

    fn shape(segments: &[Segment]) -> Vec<(&str, Vec<&str>)> {
        segments
            .iter()
            .map(|s| {
                (
                    s.route_id.as_str(),
                    s.stops.iter().map(StopId::as_str).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn merges_short_pair_covered_by_one_route() {
        let routes = vec![
            route("R1", &["A", "B", "C"]),
            route("R2", &["B", "C", "D"]),
            route("long", &["A", "B", "C", "D", "E"]),
        ];
        let segs = vec![
            seg(&routes, "R1", &["A", "B", "C"]),
            seg(&routes, "R2", &["C", "D"]),
        ];

        let out = merge_pass(segs, &routes, 3);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].route_id, rid("long"));
        assert_eq!(out[0].name, "LONG");
        assert_eq!(out[0].stops, vec![sid("A"), sid("B"), sid("C"), sid("D")]);
    }

    #[test]
    fn keeps_pair_when_no_route_covers_it() {
        let routes = vec![
            route("R1", &["A", "B", "C", "D"]),
            route("R2", &["D", "E", "F"]),
        ];
        let segs = vec![
            seg(&routes, "R1", &["A", "B", "C", "D"]),
            seg(&routes, "R2", &["D", "E", "F"]),
        ];

        let out = merge_pass(segs.clone(), &routes, 3);
        assert_eq!(out, segs);
    }

    #[test]
    fn long_pairs_are_not_attempted() {
        let routes = vec![
            route("R1", &["A", "B", "C", "D"]),
            route("R2", &["D", "E", "F", "G"]),
            route("all", &["A", "B", "C", "D", "E", "F", "G"]),
        ];
        let segs = vec![
            seg(&routes, "R1", &["A", "B", "C", "D"]),
            seg(&routes, "R2", &["D", "E", "F", "G"]),
        ];

        assert_eq!(merge_pass(segs.clone(), &routes, 3).len(), 2);
        assert_eq!(merge_pass(segs, &routes, 4).len(), 1);
    }

    #[test]
    fn reversed_ride_does_not_merge() {
        let routes = vec![route("R1", &["A", "B", "C"]), route("R2", &["C", "D"])];
        let segs = vec![
            seg(&routes, "R1", &["C", "B"]),
            seg(&routes, "R1", &["B", "A"]),
        ];

        assert_eq!(merge_pass(segs, &routes, 3).len(), 2);
    }

    #[test]
    fn single_pass_leaves_chain_of_three() {
        let routes = vec![
            route("R1", &["A", "B"]),
            route("R2", &["B", "C"]),
            route("R3", &["C", "D"]),
            route("all", &["A", "B", "C", "D"]),
        ];
        let segs = vec![
            seg(&routes, "R1", &["A", "B"]),
            seg(&routes, "R2", &["B", "C"]),
            seg(&routes, "R3", &["C", "D"]),
        ];

        let single = merge_segments(segs.clone(), &routes, &SearchConfig::default());
        assert_eq!(
            shape(&single),
            vec![("all", vec!["A", "B", "C"]), ("R3", vec!["C", "D"])]
        );

        let config = SearchConfig {
            merge_until_stable: true,
            ..SearchConfig::default()
        };
        let stable = merge_segments(segs, &routes, &config);
        assert_eq!(stable.len(), 1);
        assert_eq!(stable[0].route_id, rid("all"));
        assert_eq!(stable[0].stops.len(), 4);
    }

    #[test]
    fn single_segment_and_empty_pass_through() {
        let routes = vec![route("R1", &["A", "B"])];
        let one = vec![seg(&routes, "R1", &["A", "B"])];
        assert_eq!(merge_pass(one.clone(), &routes, 3), one);
        assert!(merge_pass(Vec::new(), &routes, 3).is_empty());
    }

    #[test]
    fn join_drops_shared_boundary_once() {
        let joined = join_stops(&[sid("A"), sid("B")], &[sid("B"), sid("C")]);
        assert_eq!(joined, vec![sid("A"), sid("B"), sid("C")]);

        let disjoint = join_stops(&[sid("A")], &[sid("C")]);
        assert_eq!(disjoint, vec![sid("A"), sid("C")]);
    }
}
