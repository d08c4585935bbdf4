//! Bus stop records and their snapping state

use geo::Point;

use crate::OsmNodeId;

/// Result of snapping a stop to a road graph node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopSnap {
    /// OSM ID of the nearest graph node
    pub node_id: OsmNodeId,
    /// Great-circle distance between stop and node, meters
    pub distance: f64,
}

/// A single bus stop loaded from the input table
#[derive(Debug, Clone)]
pub struct BusStop {
    pub name: String,
    /// Stop location (lon, lat) in EPSG:4326
    pub geometry: Point<f64>,
    /// Overwritten by each snapping pass
    pub snap: Option<StopSnap>,
}

impl BusStop {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            geometry: Point::new(lon, lat),
            snap: None,
        }
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }

    pub fn snap_distance(&self) -> Option<f64> {
        self.snap.map(|s| s.distance)
    }

    /// True if the last snapping pass left this stop farther from the
    /// network than `threshold` meters. Unsnapped stops are not "far",
    /// they simply have not been measured yet.
    pub fn is_far(&self, threshold: f64) -> bool {
        self.snap.is_some_and(|s| s.distance > threshold)
    }
}
