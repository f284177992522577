//! Spatial graph of surveyed path segments between recognized locations

use geo::{Coord, LineString, Point};
use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::model::NodeId;

/// Geometry graph node: a located campus node that surveyed paths touch.
#[derive(Debug, Clone)]
pub struct GeometryNode {
    /// Id of the corresponding node in the [`LocationGraph`](crate::LocationGraph)
    pub location: NodeId,
    pub geometry: Point<f64>,
}

/// One surveyed path segment between two recognized nodes.
#[derive(Debug, Clone)]
pub struct GeometrySegment {
    /// Vertex sequence in lon/lat order, stored in insertion orientation
    pub line: LineString<f64>,
    /// Sum of great-circle distances between consecutive vertices, meters
    pub length_m: f64,
}

/// Undirected graph of [`GeometrySegment`]s keyed by unordered node pairs.
///
/// The node set is always a subset of the location graph's nodes. At most
/// one segment exists per pair; re-inserting a pair replaces the segment.
#[derive(Debug, Clone, Default)]
pub struct GeometryGraph {
    pub graph: UnGraph<GeometryNode, GeometrySegment>,
    node_lookup: HashMap<NodeId, NodeIndex>,
}

impl GeometryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ensure_node(&mut self, location: NodeId, geometry: Point<f64>) -> NodeIndex {
        if let Some(&index) = self.node_lookup.get(&location) {
            return index;
        }
        let index = self.graph.add_node(GeometryNode { location, geometry });
        self.node_lookup.insert(location, index);
        index
    }

    pub(crate) fn insert_segment(
        &mut self,
        a: (NodeId, Point<f64>),
        b: (NodeId, Point<f64>),
        segment: GeometrySegment,
    ) {
        let index_a = self.ensure_node(a.0, a.1);
        let index_b = self.ensure_node(b.0, b.1);
        // Last-built segment wins for a pair. Remove-then-add rather than
        // update_edge so the stored endpoint order always matches the
        // segment's vertex orientation.
        if let Some(existing) = self.graph.find_edge(index_a, index_b) {
            self.graph.remove_edge(existing);
        }
        self.graph.add_edge(index_a, index_b, segment);
    }

    #[must_use]
    pub fn node_index(&self, location: NodeId) -> Option<NodeIndex> {
        self.node_lookup.get(&location).copied()
    }

    #[must_use]
    pub fn contains(&self, location: NodeId) -> bool {
        self.node_lookup.contains_key(&location)
    }

    /// Segment vertices for the pair `(a, b)`, oriented from `a` to `b`.
    #[must_use]
    pub fn oriented_coords(&self, a: NodeId, b: NodeId) -> Option<Vec<Coord<f64>>> {
        let index_a = self.node_index(a)?;
        let index_b = self.node_index(b)?;
        let edge = self.graph.find_edge(index_a, index_b)?;
        let (stored_from, _) = self.graph.edge_endpoints(edge)?;
        let segment = &self.graph[edge];

        let mut coords: Vec<Coord<f64>> = segment.line.coords().copied().collect();
        if stored_from != index_a {
            coords.reverse();
        }
        Some(coords)
    }

    #[must_use]
    pub fn segment(&self, a: NodeId, b: NodeId) -> Option<&GeometrySegment> {
        let edge = self
            .graph
            .find_edge(self.node_index(a)?, self.node_index(b)?)?;
        Some(&self.graph[edge])
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point};

    fn segment(coords: LineString<f64>) -> GeometrySegment {
        GeometrySegment {
            line: coords,
            length_m: 10.0,
        }
    }

    #[test]
    fn pair_orientation_is_normalized() {
        let mut graph = GeometryGraph::new();
        graph.insert_segment(
            (0, point! { x: 0.0, y: 0.0 }),
            (1, point! { x: 0.0, y: 0.1 }),
            segment(line_string![(x: 0.0, y: 0.0), (x: 0.01, y: 0.05), (x: 0.0, y: 0.1)]),
        );

        let forward = graph.oriented_coords(0, 1).unwrap();
        let backward = graph.oriented_coords(1, 0).unwrap();

        assert_eq!(forward.first(), backward.last());
        assert_eq!(forward.last(), backward.first());
        assert_eq!(forward[0], Coord { x: 0.0, y: 0.0 });
    }

    #[test]
    fn reinsertion_replaces_the_segment() {
        let mut graph = GeometryGraph::new();
        let a = (0, point! { x: 0.0, y: 0.0 });
        let b = (1, point! { x: 0.0, y: 0.1 });

        graph.insert_segment(a, b, segment(line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 0.1)]));
        graph.insert_segment(
            b,
            a,
            segment(line_string![(x: 0.0, y: 0.1), (x: 0.02, y: 0.05), (x: 0.0, y: 0.0)]),
        );

        assert_eq!(graph.segment_count(), 1);
        assert_eq!(graph.segment(0, 1).unwrap().line.coords().count(), 3);

        // The replacement was inserted b-first, orientation must follow
        let from_b = graph.oriented_coords(1, 0).unwrap();
        assert_eq!(from_b[0], Coord { x: 0.0, y: 0.1 });
        assert_eq!(from_b[2], Coord { x: 0.0, y: 0.0 });
    }
}
