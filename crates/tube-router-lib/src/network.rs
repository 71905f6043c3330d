use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

/// Identifier for a station, as it appears in the network data file.
pub type StationId = String;

/// Identifier for a line, as it appears in the network data file.
pub type LineId = String;

/// A physical stop in the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Fare zones; a boundary station belongs to both adjacent zones.
    pub zones: BTreeSet<i32>,
}

/// A named service attached to connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe: Option<String>,
}

/// Undirected connection record prior to validation.
///
/// `minutes` is signed so that records with zero or negative travel times can
/// be represented and then filtered out by [`Network::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub station1: StationId,
    pub station2: StationId,
    pub line: LineId,
    pub minutes: i64,
}

/// Directed edge within the adjacency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub to: StationId,
    pub line: LineId,
    pub minutes: u32,
}

/// Immutable in-memory transit network.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: HashMap<StationId, Station>,
    /// Station identifiers in the order the records were supplied.
    station_order: Vec<StationId>,
    lines: HashMap<LineId, Line>,
    adjacency: HashMap<StationId, Vec<Edge>>,
    connection_count: usize,
}

impl Network {
    /// Build a network from raw records.
    ///
    /// A connection is kept only when both endpoints and its line resolve to
    /// known entities and its travel time is a positive number of minutes.
    /// Each kept connection contributes one directed edge per direction.
    pub fn from_parts(
        stations: impl IntoIterator<Item = Station>,
        lines: impl IntoIterator<Item = Line>,
        connections: impl IntoIterator<Item = Connection>,
    ) -> Self {
        let mut station_order = Vec::new();
        let mut by_id: HashMap<StationId, Station> = HashMap::new();
        for station in stations {
            let id = station.id.clone();
            if by_id.insert(id.clone(), station).is_none() {
                station_order.push(id);
            }
        }
        let stations = by_id;
        let lines: HashMap<LineId, Line> = lines
            .into_iter()
            .map(|line| (line.id.clone(), line))
            .collect();

        let mut adjacency: HashMap<StationId, Vec<Edge>> = stations
            .keys()
            .map(|id| (id.clone(), Vec::new()))
            .collect();

        let mut connection_count = 0usize;
        let mut dropped = 0usize;
        for connection in connections {
            let Some(minutes) = valid_minutes(connection.minutes) else {
                dropped += 1;
                continue;
            };
            if !stations.contains_key(&connection.station1)
                || !stations.contains_key(&connection.station2)
                || !lines.contains_key(&connection.line)
            {
                dropped += 1;
                continue;
            }

            adjacency
                .entry(connection.station1.clone())
                .or_default()
                .push(Edge {
                    to: connection.station2.clone(),
                    line: connection.line.clone(),
                    minutes,
                });
            adjacency
                .entry(connection.station2)
                .or_default()
                .push(Edge {
                    to: connection.station1,
                    line: connection.line,
                    minutes,
                });
            connection_count += 1;
        }

        if dropped > 0 {
            debug!(dropped, "skipped connections with unknown references or invalid times");
        }

        Self {
            stations,
            station_order,
            lines,
            adjacency,
            connection_count,
        }
    }

    /// Lookup a station by identifier.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Lookup a line by identifier.
    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.get(id)
    }

    /// Return the outgoing edges for a given station identifier.
    pub fn neighbours(&self, station: &str) -> &[Edge] {
        self.adjacency
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stations in the order their records were supplied.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.station_order
            .iter()
            .filter_map(|id| self.stations.get(id))
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn contains_station(&self, id: &str) -> bool {
        self.stations.contains_key(id)
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of undirected connections that survived validation.
    pub fn connection_count(&self) -> usize {
        self.connection_count
    }
}

fn valid_minutes(minutes: i64) -> Option<u32> {
    if minutes > 0 {
        u32::try_from(minutes).ok()
    } else {
        None
    }
}

/// Parse a raw zone value into a set of zone numbers.
///
/// Accepts plain integers (`"2"`), boundary notation (`"2.5"` yields zones 2
/// and 3) and other numbers, which are rounded half to even. Missing, `NULL`
/// or unparseable values yield an empty set.
pub fn parse_zones(raw: Option<&str>) -> BTreeSet<i32> {
    let Some(value) = raw.map(str::trim) else {
        return BTreeSet::new();
    };
    if value.is_empty() || value == "NULL" {
        return BTreeSet::new();
    }

    if is_digits(value) {
        return value
            .parse::<i32>()
            .map(|zone| BTreeSet::from([zone]))
            .unwrap_or_default();
    }

    if let Some(base) = value.strip_suffix(".5").filter(|base| is_digits(base)) {
        if let Ok(base) = base.parse::<i32>() {
            return base
                .checked_add(1)
                .map(|next| BTreeSet::from([base, next]))
                .unwrap_or_default();
        }
    }

    let Ok(zone) = value.parse::<f64>() else {
        return BTreeSet::new();
    };
    let zone = zone.round_ties_even();
    if zone.is_finite() && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&zone) {
        BTreeSet::from([zone as i32])
    } else {
        BTreeSet::new()
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str) -> Station {
        Station {
            id: id.to_string(),
            name: format!("Station {id}"),
            latitude: 51.5,
            longitude: -0.1,
            zones: BTreeSet::new(),
        }
    }

    fn line(id: &str) -> Line {
        Line {
            id: id.to_string(),
            name: format!("Line {id}"),
            colour: None,
            stripe: None,
        }
    }

    fn connection(a: &str, b: &str, line: &str, minutes: i64) -> Connection {
        Connection {
            station1: a.to_string(),
            station2: b.to_string(),
            line: line.to_string(),
            minutes,
        }
    }

    #[test]
    fn connections_become_two_directed_edges() {
        let network = Network::from_parts(
            [station("a"), station("b")],
            [line("1")],
            [connection("a", "b", "1", 3)],
        );

        assert_eq!(network.connection_count(), 1);
        assert_eq!(
            network.neighbours("a"),
            &[Edge {
                to: "b".to_string(),
                line: "1".to_string(),
                minutes: 3
            }]
        );
        assert_eq!(network.neighbours("b")[0].to, "a");
    }

    #[test]
    fn malformed_connections_are_dropped() {
        let network = Network::from_parts(
            [station("a"), station("b")],
            [line("1")],
            [
                connection("a", "missing", "1", 2),
                connection("a", "b", "99", 2),
                connection("a", "b", "1", 0),
                connection("a", "b", "1", -4),
            ],
        );

        assert_eq!(network.connection_count(), 0);
        assert!(network.neighbours("a").is_empty());
        assert!(network.neighbours("b").is_empty());
    }

    #[test]
    fn every_station_has_adjacency_entry() {
        let network =
            Network::from_parts([station("lonely")], [line("1")], Vec::<Connection>::new());
        assert!(network.contains_station("lonely"));
        assert!(network.neighbours("lonely").is_empty());
        assert!(network.neighbours("nowhere").is_empty());
    }

    #[test]
    fn stations_iterate_in_supplied_order() {
        let network = Network::from_parts(
            [station("c"), station("a"), station("b"), station("a")],
            [line("1")],
            Vec::<Connection>::new(),
        );
        let ids: Vec<&str> = network.stations().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(network.station_count(), 3);
    }

    #[test]
    fn zones_parse_integers_and_boundaries() {
        assert_eq!(parse_zones(Some("2")), BTreeSet::from([2]));
        assert_eq!(parse_zones(Some(" 1 ")), BTreeSet::from([1]));
        assert_eq!(parse_zones(Some("2.5")), BTreeSet::from([2, 3]));
        assert_eq!(parse_zones(Some("3.0")), BTreeSet::from([3]));
    }

    #[test]
    fn other_fractions_round_half_to_even() {
        assert_eq!(parse_zones(Some("2.50")), BTreeSet::from([2]));
        assert_eq!(parse_zones(Some("3.50")), BTreeSet::from([4]));
        assert_eq!(parse_zones(Some("1.4")), BTreeSet::from([1]));
        assert_eq!(parse_zones(Some("-2.5")), BTreeSet::from([-2]));
    }

    #[test]
    fn negative_zones_are_kept() {
        assert_eq!(parse_zones(Some("-1")), BTreeSet::from([-1]));
    }

    #[test]
    fn zones_tolerate_missing_and_garbage() {
        assert!(parse_zones(None).is_empty());
        assert!(parse_zones(Some("")).is_empty());
        assert!(parse_zones(Some("NULL")).is_empty());
        assert!(parse_zones(Some("zone one")).is_empty());
        assert!(parse_zones(Some("NaN")).is_empty());
        assert!(parse_zones(Some("inf")).is_empty());
    }
}
