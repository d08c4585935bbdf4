//! Data model for the stop-centric road network
//!
//! Contains the bus stop records and the road graph they snap onto.

pub mod network;
pub mod stops;

pub use network::{IndexedPoint, RoadClass, RoadEdge, RoadGraph, RoadNode};
pub use stops::{BusStop, StopSnap};
