//! GeoPackage export
//!
//! One SQLite container with `links`, `nodes` and `stops` feature
//! tables in EPSG:4326. Geometries are stored as standard GeoPackage
//! blobs: the "GP" header followed by little-endian WKB.

use std::path::Path;

use geo::Geometry;
use geozero::{CoordDimensions, ToWkb};
use log::info;
use rusqlite::Connection;

use crate::{Error, pipeline::StopNetwork};

const SRS_ID: i32 = 4326;

const SCHEMA: &str = "
CREATE TABLE gpkg_spatial_ref_sys (
    srs_name TEXT NOT NULL,
    srs_id INTEGER PRIMARY KEY,
    organization TEXT NOT NULL,
    organization_coordsys_id INTEGER NOT NULL,
    definition TEXT NOT NULL,
    description TEXT
);
INSERT INTO gpkg_spatial_ref_sys VALUES
    ('Undefined Cartesian SRS', -1, 'NONE', -1, 'undefined', NULL),
    ('Undefined Geographic SRS', 0, 'NONE', 0, 'undefined', NULL),
    ('WGS 84 geodetic', 4326, 'EPSG', 4326,
     'GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563]],PRIMEM[\"Greenwich\",0],UNIT[\"degree\",0.0174532925199433]]',
     'longitude/latitude coordinates in decimal degrees on the WGS 84 spheroid');

CREATE TABLE gpkg_contents (
    table_name TEXT NOT NULL PRIMARY KEY,
    data_type TEXT NOT NULL,
    identifier TEXT UNIQUE,
    description TEXT DEFAULT '',
    last_change DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
    min_x DOUBLE,
    min_y DOUBLE,
    max_x DOUBLE,
    max_y DOUBLE,
    srs_id INTEGER,
    CONSTRAINT fk_gc_r_srs_id FOREIGN KEY (srs_id) REFERENCES gpkg_spatial_ref_sys(srs_id)
);

CREATE TABLE gpkg_geometry_columns (
    table_name TEXT NOT NULL,
    column_name TEXT NOT NULL,
    geometry_type_name TEXT NOT NULL,
    srs_id INTEGER NOT NULL,
    z TINYINT NOT NULL,
    m TINYINT NOT NULL,
    CONSTRAINT pk_geom_cols PRIMARY KEY (table_name, column_name)
);
INSERT INTO gpkg_geometry_columns VALUES
    ('links', 'geom', 'LINESTRING', 4326, 0, 0),
    ('nodes', 'geom', 'POINT', 4326, 0, 0),
    ('stops', 'geom', 'POINT', 4326, 0, 0);

CREATE TABLE links (
    fid INTEGER PRIMARY KEY AUTOINCREMENT,
    geom BLOB,
    way_id INTEGER,
    from_id INTEGER,
    to_id INTEGER,
    highway TEXT
);
CREATE TABLE nodes (
    fid INTEGER PRIMARY KEY AUTOINCREMENT,
    geom BLOB,
    node_id INTEGER
);
CREATE TABLE stops (
    fid INTEGER PRIMARY KEY AUTOINCREMENT,
    geom BLOB,
    stop_name TEXT,
    near_node INTEGER,
    snap_dist DOUBLE
);
";

pub fn write_geopackage(network: &StopNetwork, path: &Path) -> Result<(), Error> {
    // the container is rewritten wholesale on every run
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA application_id = 0x47504B47; PRAGMA user_version = 10300;")?;
    conn.execute_batch(SCHEMA)?;

    let tx = conn.transaction()?;
    for (from, to, edge) in network.graph.segments() {
        tx.execute(
            "INSERT INTO links (geom, way_id, from_id, to_id, highway) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                gpkg_blob(&Geometry::LineString(edge.geometry.clone()))?,
                edge.way_id,
                from.id,
                to.id,
                edge.class.to_string(),
            ],
        )?;
    }
    for node in network.graph.nodes() {
        tx.execute(
            "INSERT INTO nodes (geom, node_id) VALUES (?1, ?2)",
            rusqlite::params![gpkg_blob(&Geometry::Point(node.geometry))?, node.id],
        )?;
    }
    for stop in &network.stops {
        tx.execute(
            "INSERT INTO stops (geom, stop_name, near_node, snap_dist) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                gpkg_blob(&Geometry::Point(stop.geometry))?,
                stop.name,
                stop.snap.map(|s| s.node_id),
                stop.snap.map(|s| s.distance),
            ],
        )?;
    }
    for layer in ["links", "nodes", "stops"] {
        register_layer(&tx, layer, network)?;
    }
    tx.commit()?;

    info!("GeoPackage exported to {} (links, nodes, stops)", path.display());
    Ok(())
}

/// Records one feature table in `gpkg_contents`, with the bounding box
/// of the whole dataset (nodes and stops cover every vertex we wrote).
fn register_layer(
    tx: &rusqlite::Transaction<'_>,
    table: &str,
    network: &StopNetwork,
) -> Result<(), Error> {
    let xs = network
        .graph
        .nodes()
        .map(|n| n.geometry)
        .chain(network.stops.iter().map(|s| s.geometry));

    let mut bbox: Option<(f64, f64, f64, f64)> = None;
    for p in xs {
        let b = bbox.get_or_insert((p.x(), p.y(), p.x(), p.y()));
        b.0 = b.0.min(p.x());
        b.1 = b.1.min(p.y());
        b.2 = b.2.max(p.x());
        b.3 = b.3.max(p.y());
    }
    let bbox = bbox.unwrap_or((0.0, 0.0, 0.0, 0.0));

    tx.execute(
        "INSERT INTO gpkg_contents (table_name, data_type, identifier, min_x, min_y, max_x, max_y, srs_id)
         VALUES (?1, 'features', ?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![table, bbox.0, bbox.1, bbox.2, bbox.3, SRS_ID],
    )?;
    Ok(())
}

/// GeoPackage geometry blob: magic "GP", version 0, flags 0x01
/// (little-endian, no envelope), srs id, then the WKB body.
fn gpkg_blob(geometry: &Geometry<f64>) -> Result<Vec<u8>, Error> {
    let wkb = geometry
        .to_wkb(CoordDimensions::xy())
        .map_err(|e| Error::WkbError(e.to_string()))?;

    let mut blob = Vec::with_capacity(8 + wkb.len());
    blob.extend_from_slice(&[0x47, 0x50, 0x00, 0x01]);
    blob.extend_from_slice(&SRS_ID.to_le_bytes());
    blob.extend_from_slice(&wkb);
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use geo::{LineString, Point};

    use super::*;
    use crate::model::{BusStop, RoadClass, RoadEdge, RoadGraph, RoadNode, StopSnap};

    fn network() -> StopNetwork {
        let mut graph = RoadGraph::new();
        graph.add_segment(
            &RoadNode { id: 1, geometry: Point::new(30.30, 59.93) },
            &RoadNode { id: 2, geometry: Point::new(30.31, 59.94) },
            RoadEdge {
                way_id: 10,
                class: RoadClass::Tertiary,
                geometry: LineString::from(vec![(30.30, 59.93), (30.31, 59.94)]),
            },
        );
        let mut stop = BusStop::new("Central", 59.931, 30.305);
        stop.snap = Some(StopSnap { node_id: 1, distance: 88.0 });
        StopNetwork { graph, stops: vec![stop] }
    }

    #[test]
    fn container_lists_all_three_layers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.gpkg");
        write_geopackage(&network(), &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let mut stmt = conn
            .prepare("SELECT table_name FROM gpkg_contents ORDER BY table_name")
            .unwrap();
        let layers: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(layers, vec!["links", "nodes", "stops"]);
    }

    #[test]
    fn layers_are_nonempty_and_carry_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.gpkg");
        write_geopackage(&network(), &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let nodes: i64 = conn
            .query_row("SELECT COUNT(*) FROM nodes", [], |r| r.get(0))
            .unwrap();
        let links: i64 = conn
            .query_row("SELECT COUNT(*) FROM links", [], |r| r.get(0))
            .unwrap();
        assert_eq!(nodes, 2);
        assert_eq!(links, 1);

        let (name, dist): (String, f64) = conn
            .query_row("SELECT stop_name, snap_dist FROM stops", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(name, "Central");
        assert!((dist - 88.0).abs() < 1e-9);
    }

    #[test]
    fn geometry_blobs_have_the_gpkg_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.gpkg");
        write_geopackage(&network(), &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let blob: Vec<u8> = conn
            .query_row("SELECT geom FROM nodes LIMIT 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(&blob[0..2], b"GP");
        assert_eq!(blob[3], 0x01);
        assert_eq!(i32::from_le_bytes(blob[4..8].try_into().unwrap()), 4326);
        // WKB body starts with byte order + geometry type "Point" (1)
        assert_eq!(blob[8], 0x01);
        assert_eq!(
            u32::from_le_bytes(blob[9..13].try_into().unwrap()),
            1
        );
    }

    #[test]
    fn rewrites_an_existing_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.gpkg");
        write_geopackage(&network(), &path).unwrap();
        write_geopackage(&network(), &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let stops: i64 = conn
            .query_row("SELECT COUNT(*) FROM stops", [], |r| r.get(0))
            .unwrap();
        assert_eq!(stops, 1);
    }
}
