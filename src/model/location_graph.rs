//! Canonical store of named locations and the cost edges between them

use geo::Point;
use hashbrown::HashMap;

use crate::{Error, model::EdgeMetrics};

/// Index into the location arena.
pub type NodeId = usize;

/// A named, optionally geolocated point on campus.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    /// Coordinates in lon/lat order, absent until the location is surveyed
    pub geometry: Option<Point<f64>>,
    /// Buildings are addressable destinations, everything else is a bare intersection
    pub is_building: bool,
}

/// Directed multi-metric graph over named locations.
///
/// Mutated only while a dataset loads; routing treats it as read-only.
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    nodes: Vec<Node>,
    ids: HashMap<String, NodeId>,
    adjacency: Vec<Vec<(NodeId, EdgeMetrics)>>,
}

impl LocationGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a location. The first definition of a name wins; later
    /// duplicates return the existing id without touching stored data.
    pub fn add_node(
        &mut self,
        name: &str,
        geometry: Option<Point<f64>>,
        is_building: bool,
    ) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            name: name.to_string(),
            geometry,
            is_building,
        });
        self.adjacency.push(Vec::new());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Adds a directed edge carrying the given metric vector.
    ///
    /// Negative costs are accepted but logged as a data-quality problem;
    /// a redefinition of an existing edge replaces its metrics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] when either endpoint was never added.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        metrics: EdgeMetrics,
    ) -> Result<(), Error> {
        let source_id = self.node_id(source).ok_or_else(|| Error::UnknownNode {
            name: source.to_string(),
        })?;
        let target_id = self.node_id(target).ok_or_else(|| Error::UnknownNode {
            name: target.to_string(),
        })?;

        if metrics.has_negative() {
            log::warn!("negative cost on edge {source}-{target}: {metrics:?}");
        }

        let neighbors = &mut self.adjacency[source_id];
        if let Some(entry) = neighbors.iter_mut().find(|(id, _)| *id == target_id) {
            entry.1 = metrics;
        } else {
            neighbors.push((target_id, metrics));
        }
        Ok(())
    }

    /// Outgoing edges of a node; empty for isolated nodes.
    #[must_use]
    pub fn connections_of(&self, node: NodeId) -> &[(NodeId, EdgeMetrics)] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[must_use]
    pub fn coordinates(&self, id: NodeId) -> Option<Point<f64>> {
        self.nodes.get(id).and_then(|node| node.geometry)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// Nodes with known coordinates, the only ones geometry can snap to.
    pub fn located_nodes(&self) -> impl Iterator<Item = (NodeId, Point<f64>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(id, node)| node.geometry.map(|point| (id, point)))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
