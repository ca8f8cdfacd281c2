//! Bus routes.

use serde::{Deserialize, Serialize};

use super::{RouteId, StopId};

/// Summary figures published for a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDetails {
    /// Length of the route in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meter: Option<u32>,

    /// Number of buses running the route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_bus: Option<u32>,

    /// End-to-end travel time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_mins: Option<u32>,
}

impl RouteDetails {
    /// Duration formatted for display, e.g. "1 hour 5 mins".
    pub fn duration_text(&self) -> Option<String> {
        self.duration_mins.map(format_duration)
    }

    /// Distance formatted for display, e.g. "12.5 km".
    pub fn distance_text(&self) -> Option<String> {
        self.distance_meter.map(format_distance)
    }
}

/// A named, ordered sequence of stops served by one line.
///
/// Stop order is significant: it is the direction the route is published in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub line_color: String,
    pub stops: Vec<StopId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operator: Vec<String>,

    #[serde(default, rename = "isVerifiedRoute")]
    pub verified: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<RouteDetails>,
}

impl Route {
    /// Creates a route with no operator or detail metadata.
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        line_color: impl Into<String>,
        stops: Vec<StopId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            line_color: line_color.into(),
            stops,
            operator: Vec::new(),
            verified: false,
            details: None,
        }
    }

    /// Index of the first occurrence of `stop` on this route.
    pub fn position(&self, stop: &StopId) -> Option<usize> {
        self.stops.iter().position(|s| s == stop)
    }

    /// Returns true if the route calls at `stop`.
    pub fn serves(&self, stop: &StopId) -> bool {
        self.stops.contains(stop)
    }

    /// Returns the stops from `from` to `to` inclusive, if `from` comes
    /// strictly before `to` in the published order.
    pub fn slice_between(&self, from: &StopId, to: &StopId) -> Option<&[StopId]> {
        let start = self.position(from)?;
        let end = self.position(to)?;
        if start < end {
            Some(&self.stops[start..=end])
        } else {
            None
        }
    }

    /// Returns true if `stops` appears on this route as an exact, forward,
    /// contiguous run.
    ///
    /// The run is anchored at the first occurrence of `stops[0]`.
    pub fn contains_run(&self, stops: &[StopId]) -> bool {
        let Some(start) = stops.first().and_then(|s| self.position(s)) else {
            return false;
        };
        self.stops
            .get(start..start + stops.len())
            .is_some_and(|window| window == stops)
    }
}

/// Formats minutes as "H hour(s) M min(s)".
pub fn format_duration(total_mins: u32) -> String {
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    let hours_str = match hours {
        0 => String::new(),
        1 => "1 hour".to_string(),
        n => format!("{n} hours"),
    };
    let mins_str = match mins {
        0 => String::new(),
        1 => "1 min".to_string(),
        n => format!("{n} mins"),
    };

    [hours_str, mins_str]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats metres as kilometres, e.g. "12.5 km".
pub fn format_distance(meters: u32) -> String {
    format!("{} km", f64::from(meters) / 1000.0)
}
