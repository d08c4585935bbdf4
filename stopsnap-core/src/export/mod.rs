//! Export of the final network and stops
//!
//! Three artifacts: an interactive HTML map, per-layer shapefiles for
//! legacy transport-modeling tools, and a multi-layer GeoPackage.

mod gpkg;
mod map;
mod shp;

pub use gpkg::write_geopackage;
pub use map::write_map_html;
pub use shp::write_shapefiles;
