//! Route command handler for computing journeys between stations.

use std::path::Path;

use anyhow::{Context, Result};

use tube_router_cli::output::OutputFormat;
use tube_router_lib::{
    plan_route, Error as RouteError, RouteAlgorithm, RouteRequest, RouteSummary, Router,
};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting station name.
    pub from: String,
    /// Destination station name.
    pub to: String,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
    /// Minutes charged for each change of line.
    pub transfer_penalty: u32,
    /// Speed bound for the A* heuristic.
    pub heuristic_max_kmph: f64,
    /// Print search counters after the route.
    pub show_stats: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            start: self.from.clone(),
            goal: self.to.clone(),
            algorithm: self.algorithm,
            transfer_penalty: self.transfer_penalty,
            heuristic_max_kmph: self.heuristic_max_kmph,
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    data: &Path,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let network = super::load(data)?;
    let router = Router::new(network.clone());

    let request = args.to_request();
    let plan = match plan_route(&router, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(err)),
    };

    let summary = RouteSummary::from_plan(&network, &plan)
        .context("failed to build route summary for display")?;

    format
        .render_route_result(&summary, args.show_stats)
        .context("failed to write route output")
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownStation { name, suggestions } => {
            anyhow::anyhow!(format_unknown_station_message(&name, &suggestions))
        }
        RouteError::RouteNotFound { start, goal } => {
            anyhow::anyhow!(format_route_not_found_message(&start, &goal))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_station_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown station '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_route_not_found_message(start: &str, goal: &str) -> String {
    format!(
        "No route found between {} and {}. The stations are not connected in this network.",
        start, goal
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_station_message_lists_suggestions() {
        assert_eq!(
            format_unknown_station_message("Bnak", &[]),
            "Unknown station 'Bnak'."
        );
        assert_eq!(
            format_unknown_station_message("Bnak", &["Bank".to_string()]),
            "Unknown station 'Bnak'. Did you mean 'Bank'?"
        );
        assert_eq!(
            format_unknown_station_message(
                "Euston Sq",
                &["Euston Square".to_string(), "Euston".to_string()]
            ),
            "Unknown station 'Euston Sq'. Did you mean one of: 'Euston Square', 'Euston'?"
        );
    }

    #[test]
    fn route_not_found_message_names_both_ends() {
        let message = format_route_not_found_message("Bank", "Olympia");
        assert!(message.starts_with("No route found between Bank and Olympia."));
    }

    #[test]
    fn args_convert_to_request() {
        let args = RouteCommandArgs {
            from: "Bank".to_string(),
            to: "Angel".to_string(),
            algorithm: RouteAlgorithm::AStar,
            transfer_penalty: 3,
            heuristic_max_kmph: 90.0,
            show_stats: false,
        };
        let request = args.to_request();
        assert_eq!(request.start, "Bank");
        assert_eq!(request.goal, "Angel");
        assert_eq!(request.algorithm, RouteAlgorithm::AStar);
        assert_eq!(request.transfer_penalty, 3);
        assert_eq!(request.heuristic_max_kmph, 90.0);
    }
}
