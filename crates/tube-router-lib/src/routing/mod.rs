//! Route planning module for transit network pathfinding.
//!
//! This module provides:
//! - [`Router`] - Name-resolving front end over one network snapshot
//! - [`find_route`] - Identifier-level entry point into search and reconstruction
//! - [`RouteAlgorithm`] - Supported routing algorithms (Dijkstra, A*)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Request-based entry point with descriptive errors
//!
//! # Strategy Pattern
//!
//! Each algorithm is encapsulated in a planner implementing [`RoutePlanner`],
//! so `plan_route` does not need to know how a search is guided.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tube_router_lib::{load_network, plan_route, RouteRequest, Router};
//!
//! let network = load_network("data/london.json".as_ref())?;
//! let router = Router::new(Arc::new(network));
//! let plan = plan_route(&router, &RouteRequest::dijkstra("Bank", "Victoria"))?;
//! println!("{} minutes", plan.route.total_minutes);
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::heuristic::{GeographicHeuristic, Heuristic, DEFAULT_MAX_KMPH};
use crate::network::{Network, StationId};
use crate::reconstruct::{reconstruct_route, Route};
use crate::search::{search, SearchStats};

/// Minimum Jaro-Winkler similarity for a station to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (no heuristic).
    #[default]
    Dijkstra,
    /// A* search guided by great-circle distance.
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

/// High-level route planning request, expressed in station display names.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub algorithm: RouteAlgorithm,
    /// Minutes charged for each change of line.
    pub transfer_penalty: u32,
    /// Speed bound for the A* heuristic; ignored by Dijkstra.
    pub heuristic_max_kmph: f64,
}

impl RouteRequest {
    /// Convenience constructor for Dijkstra routes without a transfer penalty.
    pub fn dijkstra(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm: RouteAlgorithm::Dijkstra,
            transfer_penalty: 0,
            heuristic_max_kmph: DEFAULT_MAX_KMPH,
        }
    }

    /// Convenience constructor for A* routes with the default speed bound.
    pub fn a_star(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            algorithm: RouteAlgorithm::AStar,
            ..Self::dijkstra(start, goal)
        }
    }

    pub fn with_transfer_penalty(mut self, minutes: u32) -> Self {
        self.transfer_penalty = minutes;
        self
    }
}

/// Planned route returned by [`plan_route`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub transfer_penalty: u32,
    pub route: Route,
    pub stats: SearchStats,
}

impl RoutePlan {
    /// Number of legs in the route.
    pub fn hop_count(&self) -> usize {
        self.route.hop_count()
    }
}

/// Name-resolving router over a shared, immutable network.
///
/// The display-name lookup is derived once from the network this router was
/// given; separate routers never share it.
#[derive(Debug, Clone)]
pub struct Router {
    network: Arc<Network>,
    name_to_id: HashMap<String, StationId>,
}

impl Router {
    pub fn new(network: Arc<Network>) -> Self {
        // Later records overwrite earlier ones, so a duplicated name resolves
        // to the last station carrying it in the data file.
        let name_to_id: HashMap<String, StationId> = network
            .stations()
            .map(|station| (station.name.clone(), station.id.clone()))
            .collect();
        Self {
            network,
            name_to_id,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Lookup a station identifier by its case-sensitive display name.
    pub fn station_id_by_name(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    /// Lookup a station name by identifier.
    pub fn station_name(&self, id: &str) -> Option<&str> {
        self.network.station(id).map(|station| station.name.as_str())
    }

    /// Station names similar to `name`, best match first.
    pub fn fuzzy_station_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .name_to_id
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Minimum-time route between two station names using Dijkstra.
    pub fn route(&self, start: &str, goal: &str, transfer_penalty: u32) -> Option<Route> {
        self.route_dijkstra(start, goal, transfer_penalty).0
    }

    pub fn route_dijkstra(
        &self,
        start: &str,
        goal: &str,
        transfer_penalty: u32,
    ) -> (Option<Route>, SearchStats) {
        self.route_with(&DijkstraPlanner, start, goal, transfer_penalty)
    }

    /// Same as [`Router::route_dijkstra`], guided by `heuristic`.
    ///
    /// The result is only guaranteed optimal when the heuristic's speed bound
    /// is at least the fastest connection in the network.
    pub fn route_astar(
        &self,
        start: &str,
        goal: &str,
        transfer_penalty: u32,
        heuristic: &GeographicHeuristic,
    ) -> (Option<Route>, SearchStats) {
        let planner = AStarPlanner::new(*heuristic);
        self.route_with(&planner, start, goal, transfer_penalty)
    }

    fn route_with(
        &self,
        planner: &dyn RoutePlanner,
        start: &str,
        goal: &str,
        transfer_penalty: u32,
    ) -> (Option<Route>, SearchStats) {
        let (Some(start_id), Some(goal_id)) =
            (self.station_id_by_name(start), self.station_id_by_name(goal))
        else {
            return (None, SearchStats::default());
        };
        planner.find_route(&self.network, start_id, goal_id, transfer_penalty)
    }

    fn resolve_station(&self, name: &str) -> Result<&str> {
        self.station_id_by_name(name)
            .ok_or_else(|| Error::UnknownStation {
                name: name.to_string(),
                suggestions: self.fuzzy_station_matches(name, 3),
            })
    }
}

/// Find the minimum-cost route between two station identifiers.
///
/// Unknown identifiers and disconnected stations both yield `None`; callers
/// that need to tell them apart must check the identifiers beforehand. A
/// start equal to the goal yields a single-station route without searching.
pub fn find_route<H>(
    network: &Network,
    start: &str,
    goal: &str,
    transfer_penalty: u32,
    heuristic: &H,
) -> (Option<Route>, SearchStats)
where
    H: Heuristic + ?Sized,
{
    if !network.contains_station(start) || !network.contains_station(goal) {
        return (None, SearchStats::default());
    }
    if start == goal {
        return (Some(Route::single(start)), SearchStats::default());
    }

    let outcome = search(network, start, goal, transfer_penalty, heuristic);
    let route = outcome
        .best
        .as_ref()
        .and_then(|(terminal, _)| reconstruct_route(start, terminal, &outcome.predecessors));
    (route, outcome.stats)
}

/// Compute a route using the requested algorithm and penalty.
///
/// Unlike [`Router::route`], this distinguishes an unknown station name
/// ([`Error::UnknownStation`], with suggestions) from a missing connection
/// ([`Error::RouteNotFound`]).
pub fn plan_route(router: &Router, request: &RouteRequest) -> Result<RoutePlan> {
    let start_id = router.resolve_station(&request.start)?;
    let goal_id = router.resolve_station(&request.goal)?;
    let planner = select_planner(request)?;

    let (route, stats) =
        planner.find_route(router.network(), start_id, goal_id, request.transfer_penalty);
    let route = route.ok_or_else(|| Error::RouteNotFound {
        start: request.start.clone(),
        goal: request.goal.clone(),
    })?;

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        transfer_penalty: request.transfer_penalty,
        route,
        stats,
    })
}
