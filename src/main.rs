use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use geo::Point;
use roadgraph::{Config, commands, load_network};
use tracing_subscriber::EnvFilter;

/// Explore a road network: shortest routes, articulation points and
/// intersection lookup.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network document, overrides `network.path` from the configuration
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Shortest route between two intersections
    Route {
        #[arg(long)]
        from: u32,
        #[arg(long)]
        to: u32,
        /// Also write the route as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// Shortest route between the intersections nearest to two points
    RouteAt {
        #[arg(long, allow_negative_numbers = true)]
        from_x: f64,
        #[arg(long, allow_negative_numbers = true)]
        from_y: f64,
        #[arg(long, allow_negative_numbers = true)]
        to_x: f64,
        #[arg(long, allow_negative_numbers = true)]
        to_y: f64,
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
    /// Articulation points of one component, or of the whole network
    CutVertices {
        #[arg(long)]
        root: Option<u32>,
    },
    /// Intersection nearest to a point
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Describe an intersection
    Info {
        #[arg(long)]
        id: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("Invalid logging filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(network_path) = cli.network.as_ref().or(config.network.path.as_ref()) else {
        bail!("No network given: pass --network or set network.path in the configuration");
    };
    let network = load_network(network_path, &*config.network.metric.metric())?;

    let output = match cli.command {
        Command::Route { from, to, geojson } => {
            commands::route(&network, &config, from, to, geojson.as_deref())?
        }
        Command::RouteAt {
            from_x,
            from_y,
            to_x,
            to_y,
            geojson,
        } => commands::route_at(
            &network,
            &config,
            Point::new(from_x, from_y),
            Point::new(to_x, to_y),
            geojson.as_deref(),
        )?,
        Command::CutVertices { root } => commands::cut_vertices(&network, root)?,
        Command::Nearest { x, y } => commands::nearest(&network, &config, Point::new(x, y))?,
        Command::Info { id } => commands::info(&network, id)?,
    };

    println!("{output}");
    Ok(())
}
