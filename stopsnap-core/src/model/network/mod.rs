//! Road network model

pub mod components;
pub mod graph;

pub use components::{RoadClass, RoadEdge, RoadNode};
pub use graph::{IndexedPoint, RoadGraph};
