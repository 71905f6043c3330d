//! Tube router library entry points.
//!
//! This crate loads a transit network into memory and computes
//! minimum-time routes over it, optionally penalising line changes and
//! optionally guiding the search with a great-circle heuristic. Higher-level
//! consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod heuristic;
pub mod load;
pub mod network;
pub mod output;
pub mod reconstruct;
pub mod routing;
pub mod search;

pub use error::{Error, Result};
pub use heuristic::{haversine_km, GeographicHeuristic, Heuristic, ZeroHeuristic};
pub use load::{load_network, parse_network};
pub use network::{Connection, Edge, Line, LineId, Network, Station, StationId};
pub use output::{RouteEndpoint, RouteLegSummary, RouteRenderMode, RouteStep, RouteSummary};
pub use reconstruct::{count_transfers, reconstruct_route, Leg, Route};
pub use routing::{
    find_route, plan_route, select_planner, AStarPlanner, DijkstraPlanner, RouteAlgorithm,
    RoutePlan, RoutePlanner, RouteRequest, Router,
};
pub use search::{search, Predecessors, SearchOutcome, SearchState, SearchStats};
