use crate::model::RoadClass;

/// Parameters of the network build.
///
/// The defaults reproduce the established workflow: a 200 m snap
/// threshold, a 2 km buffer for the primary request over all stops and
/// a 5 km buffer for the local request around poorly-snapped stops.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Snap distance (meters) above which a stop counts as "far"
    pub snap_threshold: f64,
    /// Buffer (meters) around the hull of all stops for the primary
    /// network request
    pub primary_buffer: f64,
    /// Buffer (meters) around the hull of far stops for the local
    /// network request
    pub local_buffer: f64,
    /// Road classes of the primary network
    pub primary_classes: Vec<RoadClass>,
    /// Road classes of the local augmentation network
    pub local_classes: Vec<RoadClass>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 200.0,
            primary_buffer: 2_000.0,
            local_buffer: 5_000.0,
            primary_classes: RoadClass::major(),
            local_classes: RoadClass::minor(),
        }
    }
}
