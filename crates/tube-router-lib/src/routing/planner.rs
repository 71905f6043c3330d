//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and implementations for the
//! plain (Dijkstra) and heuristic-guided (A*) searches. Both run the same
//! transfer-aware engine; they differ only in the heuristic they hand it.

use crate::error::Result;
use crate::heuristic::{GeographicHeuristic, ZeroHeuristic};
use crate::network::Network;
use crate::reconstruct::Route;
use crate::search::SearchStats;

use super::{find_route, RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search between two station identifiers.
    ///
    /// Returns `None` for the route when either identifier is unknown or the
    /// stations are not connected.
    fn find_route(
        &self,
        network: &Network,
        start: &str,
        goal: &str,
        transfer_penalty: u32,
    ) -> (Option<Route>, SearchStats);
}

/// Dijkstra's algorithm over the augmented state space.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_route(
        &self,
        network: &Network,
        start: &str,
        goal: &str,
        transfer_penalty: u32,
    ) -> (Option<Route>, SearchStats) {
        find_route(network, start, goal, transfer_penalty, &ZeroHeuristic)
    }
}

/// A* search guided by great-circle travel time.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner {
    heuristic: GeographicHeuristic,
}

impl AStarPlanner {
    pub fn new(heuristic: GeographicHeuristic) -> Self {
        Self { heuristic }
    }

    /// Create a planner from a route request, validating its speed bound.
    pub fn from_request(request: &RouteRequest) -> Result<Self> {
        Ok(Self::new(GeographicHeuristic::new(
            request.heuristic_max_kmph,
        )?))
    }

    pub fn heuristic(&self) -> &GeographicHeuristic {
        &self.heuristic
    }
}

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_route(
        &self,
        network: &Network,
        start: &str,
        goal: &str,
        transfer_penalty: u32,
    ) -> (Option<Route>, SearchStats) {
        find_route(network, start, goal, transfer_penalty, &self.heuristic)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Result<Box<dyn RoutePlanner>> {
    Ok(match request.algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner::from_request(request)?),
    })
}
