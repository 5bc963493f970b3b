//! Isochrone CLI - command-line interface
//!
//! Computes reachable-area polygons and manages the configuration file.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::{ModeArg, RouteOptionArg};
use commands::compute::ComputeArgs;
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "isochrone")]
#[command(version = isochrone::VERSION)]
#[command(about = "Estimate the area reachable from a point within a travel time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute an isochrone and print it as a GeoJSON Feature
    Compute {
        /// Center latitude in degrees (defaults.lat if omitted)
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Center longitude in degrees (defaults.lng if omitted)
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Travel time in minutes, 1 to 120 (defaults.time if omitted)
        #[arg(long, allow_negative_numbers = true)]
        time: Option<f64>,

        /// Travel mode (defaults.mode if omitted)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Vertices on the heuristic circle
        #[arg(long)]
        points: Option<usize>,

        /// Route preference for driving probes
        #[arg(long, value_enum)]
        route_option: Option<RouteOptionArg>,

        /// Read the request from a JSON file instead of flags
        #[arg(long, conflicts_with_all = ["lat", "lng", "time", "mode"])]
        request: Option<PathBuf>,

        /// Pretty-print the GeoJSON output
        #[arg(long)]
        pretty: bool,

        /// Never call the routing provider; driving uses the heuristic
        #[arg(long)]
        no_provider: bool,

        /// Fall back to the heuristic when the routing provider is unavailable
        #[arg(long)]
        fallback: bool,
    },

    /// View or edit configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Compute {
            lat,
            lng,
            time,
            mode,
            points,
            route_option,
            request,
            pretty,
            no_provider,
            fallback,
        } => commands::compute::run(ComputeArgs {
            lat,
            lng,
            time,
            mode,
            points,
            route_option,
            request,
            pretty,
            no_provider,
            fallback,
        }),
        Commands::Config { command } => commands::config::run(command),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
