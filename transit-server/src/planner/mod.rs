//! Itinerary planner over a fixed-route bus network.
//!
//! This module answers: "which buses do I ride, and where do I change, to
//! get from this stop to that one?"
//!
//! A single route covering both stops short-circuits everything else.
//! Otherwise a breadth-first search over the stop graph finds a fewest-hop
//! path, which is grouped into per-route segments and tidied by merging
//! short segments that one route actually covers.

mod assemble;
mod bfs;
mod config;
mod direct;
mod graph;
mod merge;
mod search;


pub use assemble::assemble;
pub use bfs::{BfsResult, PathStep, find_path};
pub use config::SearchConfig;
pub use direct::find_direct;
pub use graph::{Edge, Graph};
pub use merge::{merge_pass, merge_segments};
pub use search::{ResolveError, Resolver, RouteCatalog, SearchResult};
