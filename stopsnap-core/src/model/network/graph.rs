//! Undirected road graph keyed by OSM node identifiers

use geo::Point;
use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::components::{RoadEdge, RoadNode};
use crate::OsmNodeId;

/// R-tree entry mapping a node position to its graph index
pub type IndexedPoint = GeomWithData<Point<f64>, NodeIndex>;

/// Road network graph. Node identity is the OSM node id: inserting a
/// node twice is a no-op, and at most one edge connects any pair of
/// nodes (parallel candidates are resolved in favor of the higher road
/// class). These invariants make [`RoadGraph::merge`] a set union and
/// keep nearest-node queries stable across merges.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    pub graph: UnGraph<RoadNode, RoadEdge>,
    node_index: HashMap<OsmNodeId, NodeIndex>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_index(&self, id: OsmNodeId) -> Option<NodeIndex> {
        self.node_index.get(&id).copied()
    }

    pub fn node(&self, index: NodeIndex) -> &RoadNode {
        &self.graph[index]
    }

    /// Insert a node, or return the index of the already-present node
    /// with the same OSM id.
    pub fn add_node(&mut self, id: OsmNodeId, geometry: Point<f64>) -> NodeIndex {
        match self.node_index.get(&id) {
            Some(index) => *index,
            None => {
                let index = self.graph.add_node(RoadNode { id, geometry });
                self.node_index.insert(id, index);
                index
            }
        }
    }

    /// Insert one road segment, adding its endpoints as needed.
    /// Self-loops are discarded. A segment between already-connected
    /// nodes replaces the existing edge only when it ranks higher in
    /// the road hierarchy.
    pub fn add_segment(&mut self, from: &RoadNode, to: &RoadNode, edge: RoadEdge) {
        if from.id == to.id {
            return;
        }
        let a = self.add_node(from.id, from.geometry);
        let b = self.add_node(to.id, to.geometry);
        match self.graph.find_edge(a, b) {
            Some(existing) => {
                if edge.class < self.graph[existing].class {
                    self.graph[existing] = edge;
                }
            }
            None => {
                self.graph.add_edge(a, b, edge);
            }
        }
    }

    /// Set-union composition of two graphs. Nodes are deduplicated by
    /// OSM id and edges by node pair, so merging a graph into itself
    /// (or merging twice) changes nothing.
    pub fn merge(&mut self, other: &RoadGraph) {
        for node in other.nodes() {
            self.add_node(node.id, node.geometry);
        }
        for (from, to, edge) in other.segments() {
            self.add_segment(from, to, edge.clone());
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.graph.node_weights()
    }

    /// Edges with their endpoint nodes, for export
    pub fn segments(&self) -> impl Iterator<Item = (&RoadNode, &RoadNode, &RoadEdge)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], e.weight()))
    }

    /// Bulk-load an R-tree over the node positions for nearest-node
    /// queries.
    pub fn build_rtree(&self) -> RTree<IndexedPoint> {
        let points: Vec<IndexedPoint> = self
            .graph
            .node_indices()
            .map(|index| IndexedPoint::new(self.graph[index].geometry, index))
            .collect();
        RTree::bulk_load(points)
    }
}

#[cfg(test)]
mod tests {
    use geo::{Point, line_string};

    use super::*;
    use crate::model::network::RoadClass;

    fn node(id: OsmNodeId, lon: f64, lat: f64) -> RoadNode {
        RoadNode {
            id,
            geometry: Point::new(lon, lat),
        }
    }

    fn edge(way_id: i64, class: RoadClass) -> RoadEdge {
        RoadEdge {
            way_id,
            class,
            geometry: line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
        }
    }

    #[test]
    fn nodes_deduplicate_by_id() {
        let mut g = RoadGraph::new();
        let a = g.add_node(1, Point::new(0.0, 0.0));
        let b = g.add_node(1, Point::new(0.0, 0.0));
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn parallel_edges_keep_higher_class() {
        let mut g = RoadGraph::new();
        let (a, b) = (node(1, 0.0, 0.0), node(2, 1.0, 1.0));
        g.add_segment(&a, &b, edge(10, RoadClass::Residential));
        g.add_segment(&a, &b, edge(11, RoadClass::Primary));
        g.add_segment(&b, &a, edge(12, RoadClass::Service));

        assert_eq!(g.edge_count(), 1);
        let (_, _, kept) = g.segments().next().unwrap();
        assert_eq!(kept.class, RoadClass::Primary);
        assert_eq!(kept.way_id, 11);
    }

    #[test]
    fn self_loops_are_discarded() {
        let mut g = RoadGraph::new();
        let a = node(1, 0.0, 0.0);
        g.add_segment(&a, &a, edge(10, RoadClass::Primary));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn merge_is_a_set_union() {
        let mut main = RoadGraph::new();
        main.add_segment(&node(1, 0.0, 0.0), &node(2, 1.0, 0.0), edge(10, RoadClass::Primary));

        let mut local = RoadGraph::new();
        // shares node 2 with the main graph
        local.add_segment(&node(2, 1.0, 0.0), &node(3, 2.0, 0.0), edge(20, RoadClass::Residential));
        local.add_segment(&node(1, 0.0, 0.0), &node(2, 1.0, 0.0), edge(21, RoadClass::Residential));

        main.merge(&local);
        assert_eq!(main.node_count(), 3);
        assert_eq!(main.edge_count(), 2);

        // shared edge kept the primary classification
        let a = main.node_index(1).unwrap();
        let b = main.node_index(2).unwrap();
        let shared = main.graph.find_edge(a, b).unwrap();
        assert_eq!(main.graph[shared].class, RoadClass::Primary);

        // merging again changes nothing
        let (nodes, edges) = (main.node_count(), main.edge_count());
        main.merge(&local);
        assert_eq!((main.node_count(), main.edge_count()), (nodes, edges));
    }

    #[test]
    fn node_indices_stable_after_merge() {
        let mut main = RoadGraph::new();
        main.add_segment(&node(1, 0.0, 0.0), &node(2, 1.0, 0.0), edge(10, RoadClass::Primary));
        let before = main.node_index(1).unwrap();

        let mut local = RoadGraph::new();
        local.add_segment(&node(3, 5.0, 5.0), &node(4, 6.0, 5.0), edge(20, RoadClass::Service));
        main.merge(&local);

        assert_eq!(main.node_index(1).unwrap(), before);
        assert_eq!(main.node(before).id, 1);
    }

    #[test]
    fn rtree_finds_nearest_node() {
        let mut g = RoadGraph::new();
        g.add_segment(&node(1, 0.0, 0.0), &node(2, 1.0, 0.0), edge(10, RoadClass::Primary));
        let tree = g.build_rtree();
        let nearest = tree.nearest_neighbor(&Point::new(0.9, 0.1)).unwrap();
        assert_eq!(g.node(nearest.data).id, 2);
    }
}
