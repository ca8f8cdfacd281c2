//! Shared, swappable access to the current network snapshot.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::dataset::{DatasetPaths, load_network};
use super::error::NetworkError;
use super::snapshot::Network;
use crate::planner::RouteCatalog;

/// Thread-safe handle to the current snapshot.
///
/// Readers take an `Arc` to the snapshot and keep using it even if a newer
/// one is swapped in meanwhile. Updates replace the whole snapshot.
#[derive(Clone)]
pub struct NetworkHandle {
    inner: Arc<RwLock<Arc<Network>>>,
    paths: Option<DatasetPaths>,
}

impl NetworkHandle {
    /// Load a snapshot from disk and wrap it in a handle that can reload.
    pub fn load(paths: DatasetPaths) -> Result<Self, NetworkError> {
        let network = load_network(&paths)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(network))),
            paths: Some(paths),
        })
    }

    /// Wrap an in-memory snapshot. [`NetworkHandle::refresh`] is a no-op.
    pub fn from_network(network: Network) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(network))),
            paths: None,
        }
    }

    /// The current snapshot.
    pub async fn current(&self) -> Arc<Network> {
        self.inner.read().await.clone()
    }

    /// Swap in a new snapshot.
    pub async fn replace(&self, network: Network) {
        let mut guard = self.inner.write().await;
        *guard = Arc::new(network);
    }

    /// Reload the dataset from disk and swap it in.
    ///
    /// On failure the current snapshot is kept and the error returned.
    /// Returns the number of routes in the new snapshot.
    pub async fn refresh(&self) -> Result<usize, NetworkError> {
        let Some(paths) = self.paths.clone() else {
            return Ok(self.current().await.routes().len());
        };

        let network = tokio::task::spawn_blocking(move || load_network(&paths))
            .await
            .map_err(|e| NetworkError::Reload {
                message: e.to_string(),
            })??;
        let count = network.routes().len();

        self.replace(network).await;
        info!(routes = count, "network snapshot refreshed");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Route, RouteId, StopId};
    use std::fs;
    use tempfile::tempdir;

    const ONE_ROUTE: &str = r##"[
        {"id": "r1", "name": "R1", "lineColor": "#000", "stops": ["A", "B"]}
    ]"##;

    const TWO_ROUTES: &str = r##"[
        {"id": "r1", "name": "R1", "lineColor": "#000", "stops": ["A", "B"]},
        {"id": "r2", "name": "R2", "lineColor": "#000", "stops": ["B", "C"]}
    ]"##;

    fn route(id: &str, stops: &[&str]) -> Route {
        Route::new(
            RouteId::parse(id).unwrap(),
            id,
            "#000",
            stops.iter().map(|s| StopId::parse(s).unwrap()).collect(),
        )
    }

    fn network(routes: Vec<Route>) -> Network {
        Network::new(Vec::new(), routes).unwrap()
    }

    #[tokio::test]
    async fn replace_swaps_snapshot_for_new_readers_only() {
        let handle = NetworkHandle::from_network(network(vec![route("r1", &["A", "B"])]));

        let before = handle.current().await;
        let routes = vec![route("r1", &["A", "B"]), route("r2", &["B", "C"])];
        handle.replace(network(routes)).await;

        assert_eq!(before.routes().len(), 1);
        assert_eq!(handle.current().await.routes().len(), 2);
    }

    #[tokio::test]
    async fn refresh_reloads_from_disk() {
        let dir = tempdir().unwrap();
        let routes = dir.path().join("routes.json");
        let stops = dir.path().join("stops.json");
        fs::write(&routes, ONE_ROUTE).unwrap();
        fs::write(&stops, "[]").unwrap();

        let paths = DatasetPaths::new(&routes, &stops);
        let handle = NetworkHandle::load(paths).unwrap();
        assert_eq!(handle.current().await.routes().len(), 1);

        fs::write(&routes, TWO_ROUTES).unwrap();
        assert_eq!(handle.refresh().await.unwrap(), 2);
        assert_eq!(handle.current().await.routes().len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_old_snapshot() {
        let dir = tempdir().unwrap();
        let routes = dir.path().join("routes.json");
        let stops = dir.path().join("stops.json");
        fs::write(&routes, ONE_ROUTE).unwrap();
        fs::write(&stops, "[]").unwrap();

        let paths = DatasetPaths::new(&routes, &stops);
        let handle = NetworkHandle::load(paths).unwrap();
        fs::write(&routes, "not json").unwrap();

        assert!(handle.refresh().await.is_err());
        assert_eq!(handle.current().await.routes().len(), 1);
    }

    #[tokio::test]
    async fn refresh_without_paths_is_noop() {
        let handle = NetworkHandle::from_network(network(vec![route("r1", &["A"])]));
        assert_eq!(handle.refresh().await.unwrap(), 1);
    }
}
