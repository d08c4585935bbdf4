//! Snapping stops to road graph nodes
//!
//! One implementation serves both the initial pass against the primary
//! network and the re-snap against the merged network: nearest node by
//! planar R-tree query, distance by great circle.

use geo::{Distance, Haversine};
use rayon::prelude::*;

use crate::{
    Error,
    model::{BusStop, RoadGraph, StopSnap},
};

/// Snap every stop to its nearest graph node, overwriting any previous
/// snap. Distances are great-circle meters between the stop and the
/// chosen node.
///
/// # Errors
///
/// Returns [`Error::NoPointsFound`] when the graph has no nodes.
pub fn snap_stops(graph: &RoadGraph, stops: &mut [BusStop]) -> Result<(), Error> {
    if graph.is_empty() {
        return Err(Error::NoPointsFound);
    }

    let rtree = graph.build_rtree();
    stops.par_iter_mut().try_for_each(|stop| {
        let nearest = rtree
            .nearest_neighbor(&stop.geometry)
            .ok_or(Error::NoPointsFound)?;
        let node = graph.node(nearest.data);
        stop.snap = Some(StopSnap {
            node_id: node.id,
            distance: Haversine.distance(stop.geometry, node.geometry),
        });
        Ok(())
    })
}

/// Stops whose last snap left them beyond `threshold` meters from the
/// network. Pure filter over the snap results.
pub fn far_stops(stops: &[BusStop], threshold: f64) -> Vec<&BusStop> {
    stops.iter().filter(|s| s.is_far(threshold)).collect()
}

pub fn max_snap_distance(stops: &[BusStop]) -> Option<f64> {
    stops
        .iter()
        .filter_map(BusStop::snap_distance)
        .max_by(f64::total_cmp)
}
