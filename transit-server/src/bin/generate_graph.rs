//! Build the stop graph from a route list and write it as JSON.
//!
//! Usage: `generate-graph [ROUTES_JSON] [GRAPH_JSON]`
//!
//! Paths default to `TRANSIT_ROUTES_PATH` / `TRANSIT_GRAPH_PATH`, then to
//! `data/route_data.json` / `data/graph.json`.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::config::DEFAULT_ROUTES_PATH;
use transit_server::network::{load_routes, write_graph};
use transit_server::planner::Graph;

const DEFAULT_GRAPH_PATH: &str = "data/graph.json";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let routes_path = path_arg(args.next(), "TRANSIT_ROUTES_PATH", DEFAULT_ROUTES_PATH);
    let graph_path = path_arg(args.next(), "TRANSIT_GRAPH_PATH", DEFAULT_GRAPH_PATH);

    let routes = match load_routes(&routes_path) {
        Ok(routes) => routes,
        Err(e) => {
            error!(error = %e, "failed to read routes");
            return ExitCode::FAILURE;
        }
    };

    let graph = Graph::build(&routes);
    if let Err(e) = write_graph(&graph, &graph_path) {
        error!(error = %e, "failed to write graph");
        return ExitCode::FAILURE;
    }

    info!(
        routes = routes.len(),
        stops = graph.stop_count(),
        edges = graph.edge_count(),
        path = %graph_path.display(),
        "graph written"
    );
    ExitCode::SUCCESS
}

fn path_arg(arg: Option<String>, var: &str, default: &str) -> PathBuf {
    arg.or_else(|| std::env::var(var).ok())
        .unwrap_or_else(|| default.to_string())
        .into()
}
