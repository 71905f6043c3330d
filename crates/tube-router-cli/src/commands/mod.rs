// Handlers for CLI subcommands. main.rs parses arguments and dispatches here.

pub mod lines;
pub mod route;
pub mod stations;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use tube_router_lib::{load_network, Network};

/// Load the network data file named on the command line.
pub fn load(path: &Path) -> Result<Arc<Network>> {
    let network = load_network(path)
        .with_context(|| format!("failed to load network from {}", path.display()))?;
    debug!(
        stations = network.station_count(),
        connections = network.connection_count(),
        "network ready"
    );
    Ok(Arc::new(network))
}
