//! Network build pipeline
//!
//! Fixed forward sequence: primary network over all stops, snap,
//! detect poorly-snapped stops, optionally densify with local roads
//! around them, snap again. Any failure aborts the run; there is no
//! retry or partial-result recovery.

use geo::Point;
use log::info;

use crate::{
    Error, geometry,
    loading::{
        NetworkConfig,
        osm::{RoadNetworkSource, WayFilter},
    },
    model::{BusStop, RoadGraph},
    snap,
};

/// Final product of the pipeline: the (possibly augmented) road graph
/// and the stops with their snap results from the last pass.
#[derive(Debug, Clone)]
pub struct StopNetwork {
    pub graph: RoadGraph,
    pub stops: Vec<BusStop>,
}

/// Builds the road network around a stop set and snaps every stop to
/// it.
///
/// # Errors
///
/// Returns an error if the stop set is empty, a network request finds
/// no roads, or snapping fails.
pub fn build_stop_network(
    mut stops: Vec<BusStop>,
    source: &impl RoadNetworkSource,
    config: &NetworkConfig,
) -> Result<StopNetwork, Error> {
    if stops.is_empty() {
        return Err(Error::InvalidData("stop table is empty".to_string()));
    }

    let points: Vec<Point<f64>> = stops.iter().map(|s| s.geometry).collect();
    let roi = geometry::buffered_hull(&points, config.primary_buffer)?;

    info!("requesting primary road network around {} stops", stops.len());
    let mut graph =
        source.graph_from_polygon(&roi, &WayFilter::new(config.primary_classes.iter().copied()))?;

    snap::snap_stops(&graph, &mut stops)?;

    let far: Vec<Point<f64>> = snap::far_stops(&stops, config.snap_threshold)
        .iter()
        .map(|s| s.geometry)
        .collect();
    info!("far stops: {}", far.len());

    if !far.is_empty() {
        let local_roi = geometry::buffered_hull(&far, config.local_buffer)?;
        let local = source
            .graph_from_polygon(&local_roi, &WayFilter::new(config.local_classes.iter().copied()))?;
        graph.merge(&local);
        info!(
            "local roads merged into main graph ({} nodes, {} edges)",
            graph.node_count(),
            graph.edge_count()
        );
    }

    snap::snap_stops(&graph, &mut stops)?;
    if let Some(max) = snap::max_snap_distance(&stops) {
        info!("final max snap distance: {max:.1} m");
    }

    Ok(StopNetwork { graph, stops })
}
