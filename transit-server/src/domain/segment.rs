//! Itinerary segments.
//!
//! A `Segment` is the unit handed to presentation: one contiguous ride on
//! one route. Stop order is the order the rider travels, which may be the
//! reverse of the route's published order.

use serde::{Deserialize, Serialize};

use super::{Route, RouteId, StopId};

/// A contiguous ride on a single route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// The route ridden.
    #[serde(rename = "id")]
    pub route_id: RouteId,
    pub name: String,
    pub line_color: String,
    pub stops: Vec<StopId>,
}

impl Segment {
    /// Creates a segment riding `route` through `stops`.
    pub fn on_route(route: &Route, stops: Vec<StopId>) -> Self {
        Self {
            route_id: route.id.clone(),
            name: route.name.clone(),
            line_color: route.line_color.clone(),
            stops,
        }
    }

    /// First stop of the ride.
    pub fn first_stop(&self) -> Option<&StopId> {
        self.stops.first()
    }

    /// Last stop of the ride.
    pub fn last_stop(&self) -> Option<&StopId> {
        self.stops.last()
    }
}

/// Returns the index `k` of the first adjacent pair where segment `k` does
/// not end at the stop segment `k + 1` starts from.
pub fn first_disjoint_boundary(segments: &[Segment]) -> Option<usize> {
    segments
        .windows(2)
        .position(|pair| match (pair[0].last_stop(), pair[1].first_stop()) {
            (Some(end), Some(start)) => end != start,
            _ => true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(route: &str, stops: &[&str]) -> Segment {
        Segment {
            route_id: RouteId::parse(route).unwrap(),
            name: route.to_uppercase(),
            line_color: "#000".to_string(),
            stops: stops.iter().map(|s| StopId::parse(s).unwrap()).collect(),
        }
    }

    #[test]
    fn joined_segments_have_no_disjoint_boundary() {
        let segments = vec![
            seg("r1", &["A", "B", "C"]),
            seg("r2", &["C", "D"]),
            seg("r3", &["D", "E"]),
        ];
        assert_eq!(first_disjoint_boundary(&segments), None);
    }

    #[test]
    fn reports_first_disjoint_pair() {
        let segments = vec![
            seg("r1", &["A", "B"]),
            seg("r2", &["B", "C"]),
            seg("r3", &["D", "E"]),
        ];
        assert_eq!(first_disjoint_boundary(&segments), Some(1));
    }

    #[test]
    fn empty_stop_list_is_disjoint() {
        let segments = vec![seg("r1", &["A", "B"]), seg("r2", &[])];
        assert_eq!(first_disjoint_boundary(&segments), Some(0));
    }

    #[test]
    fn single_or_no_segment_is_trivially_joined() {
        assert_eq!(first_disjoint_boundary(&[]), None);
        assert_eq!(first_disjoint_boundary(&[seg("r1", &["A", "B"])]), None);
    }

    #[test]
    fn serializes_with_presentation_field_names() {
        let json = serde_json::to_value(seg("r1", &["A", "B"])).unwrap();
        assert_eq!(json["id"], "r1");
        assert_eq!(json["name"], "R1");
        assert_eq!(json["lineColor"], "#000");
        assert_eq!(json["stops"], serde_json::json!(["A", "B"]));
    }
}
