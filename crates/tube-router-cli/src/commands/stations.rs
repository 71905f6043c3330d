//! Station listing command.

use std::path::Path;

use anyhow::{Context, Result};
use tube_router_cli::output::{render_json, OutputFormat};
use tube_router_lib::{Network, Station};

/// Stations sorted by name, optionally restricted to one fare zone.
pub fn select_stations(network: &Network, zone: Option<i32>) -> Vec<&Station> {
    let mut stations: Vec<&Station> = network
        .stations()
        .filter(|station| zone.is_none_or(|zone| station.zones.contains(&zone)))
        .collect();
    stations.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    stations
}

/// Handle the stations subcommand.
pub fn handle_stations_command(
    data: &Path,
    format: OutputFormat,
    zone: Option<i32>,
) -> Result<()> {
    let network = super::load(data)?;
    let stations = select_stations(&network, zone);

    if format == OutputFormat::Json {
        return render_json(&stations).context("failed to write station list");
    }
    for station in stations {
        let zones = station
            .zones
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join("/");
        if zones.is_empty() || format == OutputFormat::Basic {
            println!("{}", station.name);
        } else {
            println!("{} (zone {})", station.name, zones);
        }
    }
    Ok(())
}
