//! Shapefile export
//!
//! Writes the graph nodes, edges and stops as three separate layers.
//! DBF field names are capped at 10 characters by the format, hence
//! the truncated `stop_name` / `near_node` / `snap_dist` spelling.

use std::path::Path;

use log::info;
use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point as ShpPoint, Polyline, Writer};

use crate::{Error, pipeline::StopNetwork};

/// ESRI WKT for EPSG:4326, written as the `.prj` sidecar of each layer
const WGS84_WKT: &str = "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],\
UNIT[\"Degree\",0.0174532925199433]]";

pub fn write_shapefiles(network: &StopNetwork, dir: &Path) -> Result<(), Error> {
    std::fs::create_dir_all(dir)?;
    write_nodes(network, &dir.join("nodes.shp"))?;
    write_links(network, &dir.join("links.shp"))?;
    write_stops(network, &dir.join("stops.shp"))?;
    info!("shapefiles exported to {} (nodes, links, stops)", dir.display());
    Ok(())
}

fn write_nodes(network: &StopNetwork, path: &Path) -> Result<(), Error> {
    let table = TableWriterBuilder::new().add_numeric_field(field("node_id")?, 18, 0);
    let mut writer = Writer::from_path(path, table).map_err(shp_err)?;

    for node in network.graph.nodes() {
        let mut record = Record::default();
        record.insert(
            "node_id".to_string(),
            FieldValue::Numeric(Some(node.id as f64)),
        );
        let shape = ShpPoint::new(node.geometry.x(), node.geometry.y());
        writer.write_shape_and_record(&shape, &record).map_err(shp_err)?;
    }
    write_prj(path)
}

fn write_links(network: &StopNetwork, path: &Path) -> Result<(), Error> {
    let table = TableWriterBuilder::new()
        .add_numeric_field(field("way_id")?, 18, 0)
        .add_numeric_field(field("from_id")?, 18, 0)
        .add_numeric_field(field("to_id")?, 18, 0)
        .add_character_field(field("highway")?, 20);
    let mut writer = Writer::from_path(path, table).map_err(shp_err)?;

    for (from, to, edge) in network.graph.segments() {
        let mut record = Record::default();
        record.insert(
            "way_id".to_string(),
            FieldValue::Numeric(Some(edge.way_id as f64)),
        );
        record.insert(
            "from_id".to_string(),
            FieldValue::Numeric(Some(from.id as f64)),
        );
        record.insert("to_id".to_string(), FieldValue::Numeric(Some(to.id as f64)));
        record.insert(
            "highway".to_string(),
            FieldValue::Character(Some(edge.class.to_string())),
        );

        let points: Vec<ShpPoint> = edge
            .geometry
            .points()
            .map(|p| ShpPoint::new(p.x(), p.y()))
            .collect();
        writer
            .write_shape_and_record(&Polyline::new(points), &record)
            .map_err(shp_err)?;
    }
    write_prj(path)
}

fn write_stops(network: &StopNetwork, path: &Path) -> Result<(), Error> {
    let table = TableWriterBuilder::new()
        .add_character_field(field("stop_name")?, 80)
        .add_numeric_field(field("near_node")?, 18, 0)
        .add_numeric_field(field("snap_dist")?, 13, 2);
    let mut writer = Writer::from_path(path, table).map_err(shp_err)?;

    for stop in &network.stops {
        let mut record = Record::default();
        record.insert(
            "stop_name".to_string(),
            FieldValue::Character(Some(stop.name.clone())),
        );
        record.insert(
            "near_node".to_string(),
            FieldValue::Numeric(stop.snap.map(|s| s.node_id as f64)),
        );
        record.insert(
            "snap_dist".to_string(),
            FieldValue::Numeric(stop.snap.map(|s| s.distance)),
        );
        let shape = ShpPoint::new(stop.lon(), stop.lat());
        writer.write_shape_and_record(&shape, &record).map_err(shp_err)?;
    }
    write_prj(path)
}

fn field(name: &str) -> Result<FieldName, Error> {
    FieldName::try_from(name)
        .map_err(|e| Error::ShapefileError(format!("invalid field name '{name}': {e:?}")))
}

fn shp_err(e: shapefile::Error) -> Error {
    Error::ShapefileError(e.to_string())
}

fn write_prj(shp_path: &Path) -> Result<(), Error> {
    std::fs::write(shp_path.with_extension("prj"), WGS84_WKT)?;
    Ok(())
}
