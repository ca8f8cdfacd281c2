//! Web layer for the transit resolver.
//!
//! Provides HTTP endpoints for stop lookup, route details and itinerary search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
