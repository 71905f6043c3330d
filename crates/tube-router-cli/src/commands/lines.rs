//! Line listing command.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tube_router_cli::output::{render_json, OutputFormat};
use tube_router_cli::terminal::plural;
use tube_router_lib::{LineId, Network};

/// A line together with the number of connections it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineUsage {
    pub id: LineId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    pub connections: usize,
}

/// Count undirected connections per line, sorted by line name.
pub fn line_usage(network: &Network) -> Vec<LineUsage> {
    let mut directed: HashMap<&str, usize> = HashMap::new();
    for station in network.stations() {
        for edge in network.neighbours(&station.id) {
            *directed.entry(edge.line.as_str()).or_default() += 1;
        }
    }

    let mut usage: Vec<LineUsage> = network
        .lines()
        .map(|line| LineUsage {
            id: line.id.clone(),
            name: line.name.clone(),
            colour: line.colour.clone(),
            // Each connection is stored once per direction.
            connections: directed.get(line.id.as_str()).copied().unwrap_or(0) / 2,
        })
        .collect();
    usage.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    usage
}

/// Handle the lines subcommand.
pub fn handle_lines_command(data: &Path, format: OutputFormat) -> Result<()> {
    let network = super::load(data)?;
    let usage = line_usage(&network);

    if format == OutputFormat::Json {
        return render_json(&usage).context("failed to write line list");
    }
    for line in usage {
        println!("{}: {}", line.name, plural(line.connections, "connection"));
    }
    Ok(())
}
