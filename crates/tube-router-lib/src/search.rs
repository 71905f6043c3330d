//! Transfer-aware best-first search over (station, incoming line) states.
//!
//! The search graph is not the station graph: arriving at a station on a
//! different line changes what the next move costs once a transfer penalty is
//! in play, so each station may be reached once per incoming line. The
//! frontier is a binary heap with lazy deletion; stale entries are skipped
//! when popped instead of being decreased in place.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::heuristic::Heuristic;
use crate::network::{Edge, LineId, Network, StationId};

/// Node of the augmented search graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchState {
    pub station: StationId,
    /// Line used to arrive at `station`; `None` only for the start state.
    pub line: Option<LineId>,
}

impl SearchState {
    pub fn start(station: impl Into<StationId>) -> Self {
        Self {
            station: station.into(),
            line: None,
        }
    }

    pub fn arrival(station: impl Into<StationId>, line: impl Into<LineId>) -> Self {
        Self {
            station: station.into(),
            line: Some(line.into()),
        }
    }
}

/// Diagnostic counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States popped with an up-to-date cost.
    pub expanded: usize,
    /// Entries pushed onto the frontier, including the start state.
    pub pushed: usize,
}

/// Back-links from each relaxed state to the state and edge it was reached by.
pub type Predecessors = HashMap<SearchState, (SearchState, Edge)>;

/// Raw result of [`search`], consumed by the path reconstructor.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Cheapest goal state found and its accumulated cost (penalties included).
    pub best: Option<(SearchState, u64)>,
    pub predecessors: Predecessors,
    pub stats: SearchStats,
}

/// Run a best-first search from `start` to `goal`.
///
/// With [`ZeroHeuristic`](crate::heuristic::ZeroHeuristic) this is Dijkstra's
/// algorithm; any other heuristic makes it A*. The frontier is drained
/// completely because a cheaper arrival at the goal on another line can
/// still surface after the first goal state is popped.
///
/// `transfer_penalty` minutes are added whenever a move leaves on a different
/// line than the one the current state arrived on. Unknown station
/// identifiers produce an empty outcome without searching.
pub fn search<H>(
    network: &Network,
    start: &str,
    goal: &str,
    transfer_penalty: u32,
    heuristic: &H,
) -> SearchOutcome
where
    H: Heuristic + ?Sized,
{
    let (Some(start_station), Some(goal_station)) = (network.station(start), network.station(goal))
    else {
        return SearchOutcome::default();
    };

    let estimate = |station: &str| {
        network
            .station(station)
            .map(|from| heuristic.estimate(from, goal_station).max(0.0))
            .unwrap_or(0.0)
    };

    let mut costs: HashMap<SearchState, u64> = HashMap::new();
    let mut predecessors = Predecessors::new();
    let mut frontier = BinaryHeap::new();
    let mut stats = SearchStats::default();

    let initial = SearchState::start(start);
    costs.insert(initial.clone(), 0);
    frontier.push(FrontierEntry::new(initial, 0, estimate(&start_station.id)));
    stats.pushed += 1;

    let mut best_state: Option<SearchState> = None;
    let mut best_cost = u64::MAX;

    while let Some(FrontierEntry { cost, state, .. }) = frontier.pop() {
        if costs.get(&state) != Some(&cost) {
            continue;
        }
        stats.expanded += 1;

        if state.station == goal && cost < best_cost {
            best_cost = cost;
            best_state = Some(state.clone());
        }

        for edge in network.neighbours(&state.station) {
            let penalty = match &state.line {
                Some(line) if *line != edge.line => u64::from(transfer_penalty),
                _ => 0,
            };
            let next_cost = cost + u64::from(edge.minutes) + penalty;
            let next = SearchState::arrival(edge.to.as_str(), edge.line.as_str());

            if next_cost < costs.get(&next).copied().unwrap_or(u64::MAX) {
                costs.insert(next.clone(), next_cost);
                predecessors.insert(next.clone(), (state.clone(), edge.clone()));
                frontier.push(FrontierEntry::new(next, next_cost, estimate(&edge.to)));
                stats.pushed += 1;
            }
        }
    }

    debug!(
        start,
        goal,
        transfer_penalty,
        expanded = stats.expanded,
        pushed = stats.pushed,
        found = best_state.is_some(),
        "search finished"
    );

    SearchOutcome {
        best: best_state.map(|state| (state, best_cost)),
        predecessors,
        stats,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    estimate: FloatOrd,
    cost: u64,
    state: SearchState,
}

impl FrontierEntry {
    fn new(state: SearchState, cost: u64, heuristic: f64) -> Self {
        Self {
            estimate: FloatOrd(cost as f64 + heuristic),
            cost,
            state,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::heuristic::ZeroHeuristic;
    use crate::network::{Connection, Line, Station};

    fn network(connections: &[(&str, &str, &str, i64)]) -> Network {
        let mut ids: BTreeSet<&str> = BTreeSet::new();
        let mut lines: BTreeSet<&str> = BTreeSet::new();
        for (a, b, line, _) in connections {
            ids.insert(*a);
            ids.insert(*b);
            lines.insert(*line);
        }
        Network::from_parts(
            ids.iter().map(|id| Station {
                id: id.to_string(),
                name: id.to_uppercase(),
                latitude: 0.0,
                longitude: 0.0,
                zones: BTreeSet::new(),
            }),
            lines.iter().map(|id| Line {
                id: id.to_string(),
                name: format!("{id} line"),
                colour: None,
                stripe: None,
            }),
            connections.iter().map(|(a, b, line, minutes)| Connection {
                station1: a.to_string(),
                station2: b.to_string(),
                line: line.to_string(),
                minutes: *minutes,
            }),
        )
    }

    #[test]
    fn frontier_pops_lowest_estimate_first() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry::new(SearchState::start("a"), 5, 0.0));
        heap.push(FrontierEntry::new(SearchState::start("b"), 1, 1.5));
        heap.push(FrontierEntry::new(SearchState::start("c"), 3, 0.0));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|entry| entry.state.station)
            .collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn first_move_is_never_penalised() {
        let net = network(&[("a", "b", "red", 2)]);
        let outcome = search(&net, "a", "b", 100, &ZeroHeuristic);
        let (state, cost) = outcome.best.expect("route exists");
        assert_eq!(state, SearchState::arrival("b", "red"));
        assert_eq!(cost, 2);
    }

    #[test]
    fn penalty_applies_on_line_change() {
        let net = network(&[("a", "b", "red", 2), ("b", "c", "blue", 3)]);
        let outcome = search(&net, "a", "c", 4, &ZeroHeuristic);
        let (_, cost) = outcome.best.expect("route exists");
        assert_eq!(cost, 2 + 3 + 4);
    }

    #[test]
    fn keeps_searching_for_cheaper_arrival_on_another_line() {
        // Arriving at "b" on red is cheaper, but continuing to "c" from there
        // costs a transfer; arriving at "b" on blue avoids it.
        let net = network(&[
            ("a", "b", "red", 1),
            ("a", "x", "blue", 1),
            ("x", "b", "blue", 1),
            ("b", "c", "blue", 1),
        ]);
        let outcome = search(&net, "a", "c", 5, &ZeroHeuristic);
        let (state, cost) = outcome.best.expect("route exists");
        assert_eq!(state, SearchState::arrival("c", "blue"));
        assert_eq!(cost, 3);
    }

    #[test]
    fn goal_cost_is_minimum_over_all_incoming_lines() {
        // Goal reachable on red (cost 4) and on blue (cost 2 + penalty 0).
        let net = network(&[
            ("a", "g", "red", 4),
            ("a", "m", "blue", 1),
            ("m", "g", "blue", 1),
        ]);
        let outcome = search(&net, "a", "g", 0, &ZeroHeuristic);
        let (state, cost) = outcome.best.expect("route exists");
        assert_eq!(state.line.as_deref(), Some("blue"));
        assert_eq!(cost, 2);
    }

    #[test]
    fn disconnected_goal_yields_no_best_state() {
        let net = network(&[("a", "b", "red", 1), ("c", "d", "red", 1)]);
        let outcome = search(&net, "a", "d", 0, &ZeroHeuristic);
        assert!(outcome.best.is_none());
        assert_eq!(outcome.stats.expanded, 3);
    }

    #[test]
    fn unknown_station_skips_search() {
        let net = network(&[("a", "b", "red", 1)]);
        let outcome = search(&net, "a", "nowhere", 0, &ZeroHeuristic);
        assert!(outcome.best.is_none());
        assert_eq!(outcome.stats, SearchStats::default());
        assert!(outcome.predecessors.is_empty());
    }

    #[test]
    fn stats_count_pushes_and_expansions() {
        let net = network(&[("a", "b", "red", 1)]);
        let outcome = search(&net, "a", "b", 0, &ZeroHeuristic);
        // (a, None) -> (b, red) -> (a, red); the return to "a" improves nothing.
        assert_eq!(outcome.stats.pushed, 3);
        assert_eq!(outcome.stats.expanded, 3);
    }
}
