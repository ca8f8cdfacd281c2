use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::config::ServerConfig;
use transit_server::network::NetworkHandle;
use transit_server::planner::{RouteCatalog, SearchConfig};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,transit_server=debug")),
        )
        .init();

    let config = ServerConfig::from_env();

    // Load the dataset (fail fast if unavailable)
    let network = NetworkHandle::load(config.dataset.clone())
        .expect("Failed to load network dataset");
    {
        let snapshot = network.current().await;
        info!(
            stops = snapshot.stops().len(),
            routes = snapshot.routes().len(),
            "network loaded"
        );
    }

    // Spawn background task to reload the dataset
    if let Some(period) = config.refresh_interval {
        let handle = network.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match handle.refresh().await {
                    Ok(count) => info!(routes = count, "refreshed network"),
                    Err(e) => error!(error = %e, "failed to refresh network"),
                }
            }
        });
    }

    let state = AppState::new(network, SearchConfig::default());
    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Transit resolver listening on http://{addr}");
    info!("  GET /health                 - Health check");
    info!("  GET /api/stops/search?q=    - Search stops by name");
    info!("  GET /api/search?from=&to=   - Resolve an itinerary");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
