#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tube_router_lib::{load_network, Network, Router};

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/london_minimal.json")
}

pub fn fixture_network() -> Arc<Network> {
    Arc::new(load_network(&fixture_path()).expect("fixture loads"))
}

pub fn fixture_router() -> Router {
    Router::new(fixture_network())
}

/// Resolve a route's station identifiers back to display names.
pub fn names(router: &Router, ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|id| router.station_name(id).expect("station in fixture").to_string())
        .collect()
}
