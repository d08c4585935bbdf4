//! This module is responsible for loading input data (stop tables and
//! OSM extracts) used to build the network.

mod config;
pub mod osm;
pub mod stops;

pub use config::NetworkConfig;
