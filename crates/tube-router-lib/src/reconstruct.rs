use serde::Serialize;

use crate::network::{LineId, StationId};
use crate::search::{Predecessors, SearchState};

/// One traversed edge within a resolved route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    pub from: StationId,
    pub to: StationId,
    pub line: LineId,
    pub minutes: u32,
}

/// Resolved route between two stations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub station_ids: Vec<StationId>,
    pub legs: Vec<Leg>,
    /// Sum of leg minutes. Transfer penalties never appear here.
    pub total_minutes: u64,
    pub transfers: usize,
}

impl Route {
    /// Zero-length route that starts and ends at `station`.
    pub fn single(station: impl Into<StationId>) -> Self {
        Self {
            station_ids: vec![station.into()],
            legs: Vec::new(),
            total_minutes: 0,
            transfers: 0,
        }
    }

    /// Number of legs in the route.
    pub fn hop_count(&self) -> usize {
        self.legs.len()
    }
}

/// Build a [`Route`] by walking predecessor links back from `terminal` to the
/// start state of `start`.
///
/// Returns `None` if the chain is broken before it reaches the start.
pub fn reconstruct_route(
    start: &str,
    terminal: &SearchState,
    predecessors: &Predecessors,
) -> Option<Route> {
    let origin = SearchState::start(start);
    let mut station_ids = Vec::new();
    let mut legs = Vec::new();
    let mut current = terminal;

    while *current != origin {
        // Costs strictly decrease along predecessor links, so a chain longer
        // than the map itself can only mean corrupt input.
        if legs.len() > predecessors.len() {
            return None;
        }
        let (previous, edge) = predecessors.get(current)?;
        station_ids.push(current.station.clone());
        legs.push(Leg {
            from: previous.station.clone(),
            to: edge.to.clone(),
            line: edge.line.clone(),
            minutes: edge.minutes,
        });
        current = previous;
    }
    station_ids.push(origin.station);

    station_ids.reverse();
    legs.reverse();

    let total_minutes = legs.iter().map(|leg| u64::from(leg.minutes)).sum();
    let transfers = count_transfers(&legs);

    Some(Route {
        station_ids,
        legs,
        total_minutes,
        transfers,
    })
}

/// Count adjacent legs whose lines differ.
pub fn count_transfers(legs: &[Leg]) -> usize {
    legs.windows(2)
        .filter(|pair| pair[0].line != pair[1].line)
        .count()
}
