//! Bus stops.

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

use super::StopId;

/// A physical boarding point with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    /// Creates a stop.
    pub fn new(id: StopId, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lng,
        }
    }

    /// Squared planar distance in degrees to a coordinate.
    ///
    /// Only meaningful for comparing nearby points; use [`Stop::distance_km`]
    /// for real distances.
    pub fn squared_degree_distance(&self, lat: f64, lng: f64) -> f64 {
        let dx = self.lng - lng;
        let dy = self.lat - lat;
        dx * dx + dy * dy
    }

    /// Great-circle distance in kilometres to a coordinate (haversine).
    pub fn distance_km(&self, lat: f64, lng: f64) -> f64 {
        self.point().haversine_distance(&Point::new(lng, lat)) / 1000.0
    }

    /// The stop's position as a geographic point (x = longitude).
    pub fn point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}
