//! Road graph acquisition from OSM data

mod filter;
mod processor;

use std::path::PathBuf;

use geo::Polygon;

pub use filter::WayFilter;

use crate::{Error, model::RoadGraph};

/// Road-graph-by-polygon retrieval: given a region of interest and a
/// road class filter, produce the matching road graph. The pipeline
/// only depends on this contract, not on where the data comes from.
pub trait RoadNetworkSource {
    fn graph_from_polygon(
        &self,
        roi: &Polygon<f64>,
        filter: &WayFilter,
    ) -> Result<RoadGraph, Error>;
}

/// A local OSM PBF extract serving as the network source
#[derive(Debug, Clone)]
pub struct PbfSource {
    path: PathBuf,
}

impl PbfSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RoadNetworkSource for PbfSource {
    fn graph_from_polygon(
        &self,
        roi: &Polygon<f64>,
        filter: &WayFilter,
    ) -> Result<RoadGraph, Error> {
        processor::graph_from_polygon(&self.path, roi, filter)
    }
}
