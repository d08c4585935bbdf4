//! Road network construction around bus stop sets
//!
//! Builds a drivable road graph scoped to a set of bus stops, snaps
//! each stop to its nearest graph node, densifies the network with
//! local roads around poorly-snapped stops, and exports the result for
//! visualization and transport modeling.

pub mod error;
pub mod export;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod snap;

pub use error::Error;
pub use model::{BusStop, RoadClass, RoadEdge, RoadGraph, RoadNode, StopSnap};
pub use pipeline::{StopNetwork, build_stop_network};

/// OSM node identifier
pub type OsmNodeId = i64;
/// OSM way identifier
pub type OsmWayId = i64;
