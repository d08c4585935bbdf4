//! Region-of-interest geometry
//!
//! The road graph requests are scoped by a convex hull over stop
//! locations, expanded by a metric buffer. Buffering degrees directly
//! misjudges distances away from the equator, so the hull is projected
//! to Web Mercator, buffered in meters (corrected for Mercator scale
//! distortion), and projected back.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use geo::{Area, BoundingRect, ConvexHull, Coord, LineString, MultiPoint, Point, Polygon};

use crate::Error;

pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// lon/lat (EPSG:4326) to Web Mercator (EPSG:3857), meters
fn to_mercator(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: EARTH_RADIUS * c.x.to_radians(),
        y: EARTH_RADIUS * (FRAC_PI_4 + c.y.to_radians() / 2.0).tan().ln(),
    }
}

/// Web Mercator back to lon/lat
fn from_mercator(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (c.x / EARTH_RADIUS).to_degrees(),
        y: (2.0 * (c.y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees(),
    }
}

/// Convex hull over the given points, buffered outward by
/// `buffer_meters` of ground distance.
///
/// Hulls of one, two, or collinear points have no area; those collapse
/// to an expanded bounding box instead so that a region of interest
/// always exists around isolated stops.
///
/// # Errors
///
/// Returns an error when called with no points.
pub fn buffered_hull(points: &[Point<f64>], buffer_meters: f64) -> Result<Polygon<f64>, Error> {
    if points.is_empty() {
        return Err(Error::InvalidData(
            "cannot build a region of interest from zero points".to_string(),
        ));
    }

    let projected: MultiPoint<f64> = points
        .iter()
        .map(|p| Point::from(to_mercator(p.0)))
        .collect();

    // a ground meter spans 1/cos(lat) mercator meters
    let mean_lat = points.iter().map(|p| p.y()).sum::<f64>() / points.len() as f64;
    let distance = buffer_meters / mean_lat.to_radians().cos();

    let hull = projected.convex_hull();
    let buffered = if hull.unsigned_area() > 0.0 {
        largest_polygon(geo_buffer::buffer_polygon(&hull, distance))
    } else {
        // degenerate hull: pad the bounding box instead
        let rect = projected
            .bounding_rect()
            .ok_or(Error::NoPointsFound)?;
        let (min, max) = (rect.min(), rect.max());
        Polygon::new(
            LineString::from(vec![
                (min.x - distance, min.y - distance),
                (max.x + distance, min.y - distance),
                (max.x + distance, max.y + distance),
                (min.x - distance, max.y + distance),
                (min.x - distance, min.y - distance),
            ]),
            vec![],
        )
    };

    let exterior: LineString<f64> = buffered
        .exterior()
        .coords()
        .map(|c| from_mercator(*c))
        .collect();
    Ok(Polygon::new(exterior, vec![]))
}

/// geo-buffer yields a MultiPolygon; a buffered convex hull is a single
/// ring, so keep the largest component.
fn largest_polygon(polygons: geo::MultiPolygon<f64>) -> Polygon<f64> {
    polygons
        .into_iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
        .unwrap_or_else(|| Polygon::new(LineString::new(vec![]), vec![]))
}

#[cfg(test)]
mod tests {
    use geo::{Contains, Intersects};

    use super::*;

    #[test]
    fn mercator_roundtrip() {
        let c = Coord { x: -0.1276, y: 51.5072 };
        let back = from_mercator(to_mercator(c));
        assert!((back.x - c.x).abs() < 1e-9);
        assert!((back.y - c.y).abs() < 1e-9);
    }

    #[test]
    fn hull_covers_all_input_points() {
        let points = vec![
            Point::new(30.30, 59.93),
            Point::new(30.36, 59.95),
            Point::new(30.40, 59.91),
            Point::new(30.33, 59.90),
        ];
        let roi = buffered_hull(&points, 2000.0).unwrap();
        for p in &points {
            assert!(roi.contains(p), "{p:?} outside region of interest");
        }
    }

    #[test]
    fn single_point_gets_a_metric_neighborhood() {
        let stop = Point::new(30.0, 60.0);
        let roi = buffered_hull(&[stop], 5000.0).unwrap();
        assert!(roi.contains(&stop));

        // ~1 degree of latitude is ~111 km; 5 km should stay inside,
        // 10 km should not
        let inside = Point::new(30.0, 60.0 + 4.0 / 111.0);
        let outside = Point::new(30.0, 60.0 + 10.0 / 111.0);
        assert!(roi.contains(&inside));
        assert!(!roi.intersects(&outside));
    }

    #[test]
    fn collinear_points_still_produce_a_region() {
        let points = vec![
            Point::new(10.0, 45.0),
            Point::new(10.1, 45.0),
            Point::new(10.2, 45.0),
        ];
        let roi = buffered_hull(&points, 1000.0).unwrap();
        for p in &points {
            assert!(roi.contains(p));
        }
    }

    #[test]
    fn zero_points_is_an_error() {
        assert!(buffered_hull(&[], 1000.0).is_err());
    }
}
