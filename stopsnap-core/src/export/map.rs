//! Interactive map export
//!
//! Renders the network edges and the color-coded stops into a single
//! self-contained Leaflet page with the data embedded as GeoJSON.

use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use log::info;
use serde_json::json;

use crate::{Error, pipeline::StopNetwork};

const MAP_TEMPLATE: &str = include_str!("map_template.html");

/// Writes the interactive map to `path`. Stops at or under the snap
/// threshold render green, the rest red, each labelled with the stop
/// name and snap distance.
pub fn write_map_html(network: &StopNetwork, threshold: f64, path: &Path) -> Result<(), Error> {
    let collection = feature_collection(network, threshold)?;
    let payload = serde_json::to_string(&collection)
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;

    let count = network.stops.len() as f64;
    let center_lat = network.stops.iter().map(|s| s.lat()).sum::<f64>() / count;
    let center_lon = network.stops.iter().map(|s| s.lon()).sum::<f64>() / count;

    let html = MAP_TEMPLATE
        .replace("__GEOJSON__", &payload)
        .replace("__CENTER__", &format!("[{center_lat}, {center_lon}]"))
        .replace("__THRESHOLD__", &format!("{threshold}"));
    std::fs::write(path, html)?;

    info!("map saved as {}", path.display());
    Ok(())
}

fn feature_collection(network: &StopNetwork, threshold: f64) -> Result<FeatureCollection, Error> {
    let mut features = Vec::new();

    for (from, to, edge) in network.graph.segments() {
        let geometry = Geometry::new(GeoJsonValue::from(&edge.geometry));
        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "kind": "road",
                "way_id": edge.way_id,
                "highway": edge.class.to_string(),
                "from_id": from.id,
                "to_id": to.id,
            }
        });
        features.push(
            serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))?,
        );
    }

    for stop in &network.stops {
        let geometry = Geometry::new(GeoJsonValue::from(&stop.geometry));
        let distance = stop.snap_distance();
        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "kind": "stop",
                "name": stop.name,
                "snap_dist": distance,
                "within": distance.is_some_and(|d| d <= threshold),
            }
        });
        features.push(
            serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))?,
        );
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}
