mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tube_router_cli::output::OutputFormat;
use tube_router_lib::heuristic::DEFAULT_MAX_KMPH;
use tube_router_lib::RouteAlgorithm;

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Transit network route planner")]
struct Cli {
    /// Path to the network JSON file.
    #[arg(
        long,
        env = "TUBE_ROUTER_DATA",
        default_value = "data/london.json",
        global = true
    )]
    data: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the fastest route between two station names.
    Route(RouteArgs),
    /// List station names, optionally restricted to one fare zone.
    Stations {
        /// Only list stations in this zone.
        #[arg(long)]
        zone: Option<i32>,
    },
    /// List lines with their connection counts.
    Lines,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Starting station name.
    start: String,
    /// Destination station name.
    end: String,
    /// Minutes added for each change of line.
    #[arg(long, default_value_t = 0)]
    transfer_penalty: u32,
    /// Search algorithm.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
    algorithm: AlgorithmArg,
    /// Assumed top speed (km/h) for the A* estimate.
    #[arg(long, default_value_t = DEFAULT_MAX_KMPH)]
    heuristic_max_kmph: f64,
    /// Print search counters after the route.
    #[arg(long)]
    show_stats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Dijkstra,
    #[value(name = "a-star")]
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

impl RouteArgs {
    fn into_command_args(self) -> RouteCommandArgs {
        RouteCommandArgs {
            from: self.start,
            to: self.end,
            algorithm: self.algorithm.into(),
            transfer_penalty: self.transfer_penalty,
            heuristic_max_kmph: self.heuristic_max_kmph,
            show_stats: self.show_stats,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route(args) => commands::route::handle_route_command(
            &cli.data,
            cli.format,
            &args.into_command_args(),
        ),
        Command::Stations { zone } => {
            commands::stations::handle_stations_command(&cli.data, cli.format, zone)
        }
        Command::Lines => commands::lines::handle_lines_command(&cli.data, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
