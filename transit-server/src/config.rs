//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

use crate::network::DatasetPaths;

/// Default location of the route list.
pub const DEFAULT_ROUTES_PATH: &str = "data/route_data.json";

/// Default location of the stop list.
pub const DEFAULT_STOPS_PATH: &str = "data/stops_data.json";

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Where to load the network dataset from.
    pub dataset: DatasetPaths,

    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// How often to reload the dataset from disk. `None` disables reloading.
    pub refresh_interval: Option<Duration>,
}

impl ServerConfig {
    /// Read configuration from `TRANSIT_*` environment variables.
    ///
    /// - `TRANSIT_ROUTES_PATH`: route list (default `data/route_data.json`)
    /// - `TRANSIT_STOPS_PATH`: stop list (default `data/stops_data.json`)
    /// - `TRANSIT_GRAPH_PATH`: optional precomputed graph
    /// - `TRANSIT_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
    /// - `TRANSIT_REFRESH_SECS`: reload interval in seconds, 0 to disable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let routes = lookup("TRANSIT_ROUTES_PATH")
            .unwrap_or_else(|| DEFAULT_ROUTES_PATH.to_string());
        let stops = lookup("TRANSIT_STOPS_PATH")
            .unwrap_or_else(|| DEFAULT_STOPS_PATH.to_string());
        let mut dataset = DatasetPaths::new(routes, stops);
        if let Some(graph) = lookup("TRANSIT_GRAPH_PATH").filter(|p| !p.is_empty()) {
            dataset = dataset.with_graph(graph);
        }

        let bind_addr = lookup("TRANSIT_BIND_ADDR")
            .and_then(|raw| match raw.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    warn!(
                        value = %raw,
                        error = %e,
                        "invalid TRANSIT_BIND_ADDR, using default"
                    );
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        let refresh_interval = lookup("TRANSIT_REFRESH_SECS")
            .and_then(|raw| match raw.parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(e) => {
                    warn!(
                        value = %raw,
                        error = %e,
                        "invalid TRANSIT_REFRESH_SECS, refresh disabled"
                    );
                    None
                }
            })
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);

        Self {
            dataset,
            bind_addr,
            refresh_interval,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetPaths::new(DEFAULT_ROUTES_PATH, DEFAULT_STOPS_PATH),
            bind_addr: default_bind_addr(),
            refresh_interval: None,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}
