//! Loading the network dataset from JSON files.
//!
//! The dataset is three files: the route list, the stop list, and an
//! optional precomputed stop graph. Without a graph file the graph is built
//! from the routes on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use super::error::NetworkError;
use super::snapshot::Network;
use crate::domain::{Route, Stop};
use crate::planner::Graph;

/// Locations of the dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// JSON array of route records.
    pub routes: PathBuf,

    /// JSON array of stop records.
    pub stops: PathBuf,

    /// Optional precomputed graph (stop id → edge list).
    pub graph: Option<PathBuf>,
}

impl DatasetPaths {
    /// Paths for routes and stops; the graph is built on load.
    pub fn new(routes: impl Into<PathBuf>, stops: impl Into<PathBuf>) -> Self {
        Self {
            routes: routes.into(),
            stops: stops.into(),
            graph: None,
        }
    }

    /// Use a precomputed graph file.
    pub fn with_graph(mut self, graph: impl Into<PathBuf>) -> Self {
        self.graph = Some(graph.into());
        self
    }
}

/// Load and validate a network snapshot from disk.
pub fn load_network(paths: &DatasetPaths) -> Result<Network, NetworkError> {
    let routes: Vec<Route> = read_json(&paths.routes)?;
    let stops: Vec<Stop> = read_json(&paths.stops)?;

    match &paths.graph {
        Some(graph_path) => {
            let graph: Graph = read_json(graph_path)?;
            info!(path = %graph_path.display(), "using precomputed graph");
            Network::with_graph(stops, routes, graph)
        }
        None => Network::new(stops, routes),
    }
}

/// Read just the route list.
pub fn load_routes(path: &Path) -> Result<Vec<Route>, NetworkError> {
    read_json(path)
}

/// Write `graph` as pretty-printed JSON, creating parent directories.
pub fn write_graph(graph: &Graph, path: &Path) -> Result<(), NetworkError> {
    write_json(graph, path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, NetworkError> {
    let contents = fs::read_to_string(path).map_err(|source| NetworkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| NetworkError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), NetworkError> {
    let io_err = |source: std::io::Error| NetworkError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| NetworkError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;
    use crate::planner::RouteCatalog;
    use tempfile::tempdir;

    const ROUTES: &str = r##"[
        {
            "id": "R1",
            "name": "Ring Road",
            "lineColor": "#e53935",
            "stops": ["A", "B", "C", "D"],
            "isVerifiedRoute": true
        },
        {
            "id": "R2",
            "name": "Lagankhel",
            "lineColor": "#1e88e5",
            "stops": ["D", "E", "F"],
            "operator": ["sajha"]
        }
    ]"##;

    const STOPS: &str = r#"[
        {"id": "A", "name": "Stop A", "lat": 27.70, "lng": 85.30},
        {"id": "B", "name": "Stop B", "lat": 27.71, "lng": 85.31},
        {"id": "C", "name": "Stop C", "lat": 27.72, "lng": 85.32},
        {"id": "D", "name": "Stop D", "lat": 27.73, "lng": 85.33},
        {"id": "E", "name": "Stop E", "lat": 27.74, "lng": 85.34},
        {"id": "F", "name": "Stop F", "lat": 27.75, "lng": 85.35}
    ]"#;

    fn write_dataset(dir: &Path) -> DatasetPaths {
        let routes = dir.join("route_data.json");
        let stops = dir.join("stops_data.json");
        fs::write(&routes, ROUTES).unwrap();
        fs::write(&stops, STOPS).unwrap();
        DatasetPaths::new(routes, stops)
    }

    #[test]
    fn load_builds_graph() {
        let dir = tempdir().unwrap();
        let paths = write_dataset(dir.path());

        let net = load_network(&paths).unwrap();
        assert_eq!(net.stops().len(), 6);
        assert_eq!(net.routes().len(), 2);
        assert!(net.graph().contains(&StopId::parse("F").unwrap()));
        assert!(net.routes()[0].verified);
    }

    #[test]
    fn graph_artifact_roundtrip() {
        let dir = tempdir().unwrap();
        let paths = write_dataset(dir.path());

        let routes = load_routes(&paths.routes).unwrap();
        let graph_path = dir.path().join("out").join("graph.json");
        write_graph(&Graph::build(&routes), &graph_path).unwrap();
        assert!(graph_path.exists());

        let built = load_network(&paths).unwrap();
        let with_graph = paths.clone().with_graph(&graph_path);
        let injected = load_network(&with_graph).unwrap();
        assert_eq!(built.graph(), injected.graph());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = Path::new("/nonexistent");
        let paths = DatasetPaths::new(dir.join("routes.json"), dir.join("stops.json"));
        let err = load_network(&paths).unwrap_err();
        assert!(matches!(err, NetworkError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let dir = tempdir().unwrap();
        let paths = write_dataset(dir.path());
        fs::write(&paths.routes, "[{\"id\": \"\"}]").unwrap();

        let err = load_network(&paths).unwrap_err();
        assert!(matches!(err, NetworkError::Json { ref path, .. } if path == &paths.routes));
    }
}
