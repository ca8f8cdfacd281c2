//! The stop and route store.
//!
//! Holds the network dataset as an immutable [`Network`] snapshot, loaded
//! from JSON files and replaced wholesale when the data changes.

mod dataset;
mod error;
mod handle;
mod snapshot;

pub use dataset::{DatasetPaths, load_network, load_routes, write_graph};
pub use error::NetworkError;
pub use handle::NetworkHandle;
pub use snapshot::Network;
