//! Command-line entry point for the network builder

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use stopsnap_core::prelude::*;

/// Build a road network around a set of bus stops and export it for
/// visualization and transport modeling.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Stop table with `Stop Name`, `Stop lat`, `Stop lon` columns
    #[arg(long, default_value = "stops.csv")]
    stops: PathBuf,

    /// OSM extract (.osm.pbf) covering the stop area
    #[arg(long)]
    osm: PathBuf,

    /// Directory for the GIS exports (created if absent)
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Path of the interactive map
    #[arg(long, default_value = "network_with_stops.html")]
    map: PathBuf,

    /// Snap distance (meters) above which a stop counts as far
    #[arg(long, default_value_t = 200.0)]
    snap_threshold: f64,

    /// Buffer (meters) around all stops for the primary network
    #[arg(long, default_value_t = 2000.0)]
    primary_buffer: f64,

    /// Buffer (meters) around far stops for the local network
    #[arg(long, default_value_t = 5000.0)]
    local_buffer: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = NetworkConfig {
        snap_threshold: args.snap_threshold,
        primary_buffer: args.primary_buffer,
        local_buffer: args.local_buffer,
        ..NetworkConfig::default()
    };

    let stops = read_stops(&args.stops)
        .with_context(|| format!("reading stop table {}", args.stops.display()))?;
    info!("loaded {} stops", stops.len());

    let source = PbfSource::new(&args.osm);
    let network =
        build_stop_network(stops, &source, &config).context("building the stop network")?;

    write_map_html(&network, config.snap_threshold, &args.map)?;
    write_shapefiles(&network, &args.output_dir)?;
    write_geopackage(&network, &args.output_dir.join("network.gpkg"))?;

    Ok(())
}
