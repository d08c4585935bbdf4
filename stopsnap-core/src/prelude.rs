// Re-export key components

pub use crate::error::Error;
pub use crate::export::{write_geopackage, write_map_html, write_shapefiles};
pub use crate::loading::NetworkConfig;
pub use crate::loading::osm::{PbfSource, RoadNetworkSource, WayFilter};
pub use crate::loading::stops::read_stops;
pub use crate::pipeline::{StopNetwork, build_stop_network};

// Core types for the road network
pub use crate::model::{BusStop, RoadClass, RoadEdge, RoadGraph, RoadNode, StopSnap};
pub use crate::{OsmNodeId, OsmWayId};
