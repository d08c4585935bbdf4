use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No nearby nodes found for snapping")]
    NoPointsFound,
    #[error("No road nodes found in the region of interest")]
    NoNodesFound,
    #[error("No matching roads found in the region of interest")]
    NoWaysFound,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("OSM pbf error: {0}")]
    PbfError(#[from] osmpbf::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Shapefile error: {0}")]
    ShapefileError(String),
    #[error("Geometry encoding error: {0}")]
    WkbError(String),
    #[error("GeoPackage error: {0}")]
    GeoPackageError(#[from] rusqlite::Error),
}
