//! Road network components - nodes, edges, and highway classification

use std::fmt;
use std::str::FromStr;

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::{Error, OsmNodeId, OsmWayId};

/// OSM highway classification, ordered by authority in the road
/// hierarchy (`Motorway` ranks above `Path`). When two ways connect the
/// same pair of nodes only the higher-ranked one is kept.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoadClass {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Residential,
    Unclassified,
    Service,
    LivingStreet,
    Track,
    Path,
}

impl RoadClass {
    /// The major drivable classes requested for the primary network.
    /// The original tag filter is an unanchored regex, so `_link` ramps
    /// of each class match as well.
    pub fn major() -> Vec<RoadClass> {
        use RoadClass::*;
        vec![
            Motorway,
            MotorwayLink,
            Trunk,
            TrunkLink,
            Primary,
            PrimaryLink,
            Secondary,
            SecondaryLink,
            Tertiary,
            TertiaryLink,
        ]
    }

    /// The minor/local classes requested when augmenting around
    /// poorly-snapped stops.
    pub fn minor() -> Vec<RoadClass> {
        use RoadClass::*;
        vec![Residential, Unclassified, Service, LivingStreet, Track, Path]
    }

    pub fn as_str(&self) -> &'static str {
        use RoadClass::*;
        match self {
            Motorway => "motorway",
            MotorwayLink => "motorway_link",
            Trunk => "trunk",
            TrunkLink => "trunk_link",
            Primary => "primary",
            PrimaryLink => "primary_link",
            Secondary => "secondary",
            SecondaryLink => "secondary_link",
            Tertiary => "tertiary",
            TertiaryLink => "tertiary_link",
            Residential => "residential",
            Unclassified => "unclassified",
            Service => "service",
            LivingStreet => "living_street",
            Track => "track",
            Path => "path",
        }
    }
}

impl FromStr for RoadClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use RoadClass::*;
        match s {
            "motorway" => Ok(Motorway),
            "motorway_link" => Ok(MotorwayLink),
            "trunk" => Ok(Trunk),
            "trunk_link" => Ok(TrunkLink),
            "primary" => Ok(Primary),
            "primary_link" => Ok(PrimaryLink),
            "secondary" => Ok(Secondary),
            "secondary_link" => Ok(SecondaryLink),
            "tertiary" => Ok(Tertiary),
            "tertiary_link" => Ok(TertiaryLink),
            "residential" => Ok(Residential),
            "unclassified" => Ok(Unclassified),
            "service" => Ok(Service),
            "living_street" => Ok(LivingStreet),
            "track" => Ok(Track),
            "path" => Ok(Path),
            other => Err(Error::InvalidData(format!("unknown highway tag '{other}'"))),
        }
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// OSM ID of the node
    pub id: OsmNodeId,
    /// Node coordinates (lon, lat)
    pub geometry: Point<f64>,
}

/// Road graph edge (one segment between consecutive way nodes)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// OSM ID of the way this segment came from
    pub way_id: OsmWayId,
    pub class: RoadClass,
    /// Segment geometry for visualization and export
    pub geometry: LineString<f64>,
}
