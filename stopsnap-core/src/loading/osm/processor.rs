//! OSM pbf processing

use std::path::Path;

use geo::{Intersects, LineString, Point, Polygon};
use hashbrown::HashMap;
use itertools::Itertools;
use log::info;
use osmpbf::{Element, ElementReader};

use super::filter::WayFilter;
use crate::{
    Error, OsmNodeId, OsmWayId,
    model::{RoadClass, RoadEdge, RoadGraph, RoadNode},
};

/// Builds the road graph for one region-of-interest request.
///
/// Single pass over the extract: node coordinates are kept only when
/// they fall inside the region, ways only when the filter accepts
/// their tags. Each way then contributes one edge per consecutive node
/// pair whose both endpoints survived the clip, so ways leaving the
/// region are truncated at the last interior node rather than dragging
/// in geometry far outside the hull.
pub(crate) fn graph_from_polygon(
    path: &Path,
    roi: &Polygon<f64>,
    filter: &WayFilter,
) -> Result<RoadGraph, Error> {
    let reader = ElementReader::from_path(path)?;

    let mut nodes: HashMap<OsmNodeId, Point<f64>> = HashMap::new();
    let mut ways: Vec<(OsmWayId, RoadClass, Vec<OsmNodeId>)> = Vec::new();

    reader.for_each(|element| match element {
        Element::Node(node) => {
            let point = Point::new(node.lon(), node.lat());
            if roi.intersects(&point) {
                nodes.insert(node.id(), point);
            }
        }
        Element::DenseNode(node) => {
            let point = Point::new(node.lon(), node.lat());
            if roi.intersects(&point) {
                nodes.insert(node.id(), point);
            }
        }
        Element::Way(way) => {
            if let Some(class) = filter.accept(way.tags()) {
                ways.push((way.id(), class, way.refs().collect()));
            }
        }
        Element::Relation(_) => {}
    })?;

    if nodes.is_empty() {
        return Err(Error::NoNodesFound);
    }

    let mut graph = RoadGraph::new();
    for (way_id, class, refs) in &ways {
        for (a, b) in refs.iter().tuple_windows() {
            let (Some(from), Some(to)) = (nodes.get(a), nodes.get(b)) else {
                continue;
            };
            graph.add_segment(
                &RoadNode { id: *a, geometry: *from },
                &RoadNode { id: *b, geometry: *to },
                RoadEdge {
                    way_id: *way_id,
                    class: *class,
                    geometry: LineString::from(vec![from.0, to.0]),
                },
            );
        }
    }

    if graph.edge_count() == 0 {
        return Err(Error::NoWaysFound);
    }

    info!(
        "road graph within region: {} nodes, {} edges (from {} candidate ways)",
        graph.node_count(),
        graph.edge_count(),
        ways.len()
    );
    Ok(graph)
}
