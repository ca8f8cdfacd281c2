//! Domain types for the bus network.
//!
//! Identifiers enforce their invariants at construction time, so code that
//! receives a `StopId` or `RouteId` can trust it is well formed.

mod ids;
mod route;
mod segment;
mod stop;

pub use ids::{InvalidId, RouteId, StopId};
pub use route::{Route, RouteDetails, format_distance, format_duration};
pub use segment::{Segment, first_disjoint_boundary};
pub use stop::Stop;
