use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::network::{parse_zones, Connection, Line, Network, Station};

/// Load a network from a JSON data file.
///
/// The file holds `stations`, `lines` and `connections` arrays. Field values
/// may be JSON strings or numbers; records that cannot be used (empty
/// identifiers, non-integer travel times, dangling references) are skipped
/// rather than reported as errors.
pub fn load_network(path: &Path) -> Result<Network> {
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), "loading network");
    parse_network(&contents)
}

/// Parse a network from the JSON text of a data file.
pub fn parse_network(json: &str) -> Result<Network> {
    let raw: RawNetwork = serde_json::from_str(json)?;

    let stations: Vec<Station> = raw
        .stations
        .into_iter()
        .filter_map(RawStation::into_station)
        .collect();
    let lines: Vec<Line> = raw
        .lines
        .into_iter()
        .filter_map(RawLine::into_line)
        .collect();
    let connections: Vec<Connection> = raw
        .connections
        .into_iter()
        .filter_map(RawConnection::into_connection)
        .collect();

    let network = Network::from_parts(stations, lines, connections);
    debug!(
        stations = network.station_count(),
        connections = network.connection_count(),
        "network loaded"
    );
    Ok(network)
}

#[derive(Debug, Default, Deserialize)]
struct RawNetwork {
    #[serde(default)]
    stations: Vec<RawStation>,
    #[serde(default)]
    lines: Vec<RawLine>,
    #[serde(default)]
    connections: Vec<RawConnection>,
}

/// Scalar field that the data files encode either as a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn as_text(&self) -> String {
        match self {
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Text(value) => value.trim().to_string(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            Scalar::Text(value) => value.trim().parse().ok(),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            Scalar::Float(_) => None,
            Scalar::Text(value) => value.trim().parse().ok(),
        }
    }
}

fn text(field: &Option<Scalar>) -> String {
    field.as_ref().map(Scalar::as_text).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct RawStation {
    #[serde(default)]
    id: Option<Scalar>,
    #[serde(default)]
    name: Option<Scalar>,
    #[serde(default)]
    display_name: Option<Scalar>,
    #[serde(default)]
    latitude: Option<Scalar>,
    #[serde(default)]
    longitude: Option<Scalar>,
    #[serde(default)]
    zone: Option<Scalar>,
}

impl RawStation {
    fn into_station(self) -> Option<Station> {
        let id = text(&self.id);
        if id.is_empty() {
            return None;
        }
        let name = match text(&self.name) {
            name if name.is_empty() => text(&self.display_name),
            name => name,
        };
        let zone = self.zone.as_ref().map(Scalar::as_text);

        Some(Station {
            id,
            name,
            latitude: coordinate(&self.latitude),
            longitude: coordinate(&self.longitude),
            zones: parse_zones(zone.as_deref()),
        })
    }
}

fn coordinate(field: &Option<Scalar>) -> f64 {
    field.as_ref().and_then(Scalar::as_f64).unwrap_or(f64::NAN)
}

#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(default)]
    line: Option<Scalar>,
    #[serde(default)]
    name: Option<Scalar>,
    #[serde(default)]
    colour: Option<Scalar>,
    #[serde(default)]
    stripe: Option<Scalar>,
}

impl RawLine {
    fn into_line(self) -> Option<Line> {
        let id = text(&self.line);
        if id.is_empty() {
            return None;
        }
        Some(Line {
            id,
            name: text(&self.name),
            colour: optional_text(&self.colour),
            stripe: optional_text(&self.stripe),
        })
    }
}

fn optional_text(field: &Option<Scalar>) -> Option<String> {
    let value = text(field);
    (!value.is_empty() && value != "NULL").then_some(value)
}

#[derive(Debug, Deserialize)]
struct RawConnection {
    #[serde(default)]
    station1: Option<Scalar>,
    #[serde(default)]
    station2: Option<Scalar>,
    #[serde(default)]
    line: Option<Scalar>,
    #[serde(default)]
    time: Option<Scalar>,
}

impl RawConnection {
    fn into_connection(self) -> Option<Connection> {
        let minutes = self.time.as_ref().and_then(Scalar::as_i64)?;
        Some(Connection {
            station1: text(&self.station1),
            station2: text(&self.station2),
            line: text(&self.line),
            minutes,
        })
    }
}
