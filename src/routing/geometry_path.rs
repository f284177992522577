//! Shortest path over the geometry graph, physical length as the only cost
//!
//! Used exclusively as a fallback when no stored segment directly covers a
//! logical edge, such as when that edge spans two or more surveyed
//! sub-segments.

use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::model::{GeometryGraph, NodeId};

#[derive(Copy, Clone, PartialEq)]
struct State {
    length_m: f64,
    node: NodeIndex,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .length_m
            .total_cmp(&self.length_m)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest physical path between two locations through the geometry graph.
///
/// Returns the traversed hops as location-id pairs in forward order, or
/// `None` when either endpoint never appears in the geometry graph or no
/// path connects them.
#[must_use]
pub fn geometry_shortest_path(
    geometry: &GeometryGraph,
    start: NodeId,
    end: NodeId,
) -> Option<Vec<(NodeId, NodeId)>> {
    let start_index = geometry.node_index(start)?;
    let end_index = geometry.node_index(end)?;

    let mut lengths: HashMap<NodeIndex, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();

    lengths.insert(start_index, 0.0);
    heap.push(State {
        length_m: 0.0,
        node: start_index,
    });

    while let Some(State { length_m, node }) = heap.pop() {
        if node == end_index {
            break;
        }
        if let Some(&best) = lengths.get(&node) {
            if length_m > best {
                continue;
            }
        }

        for edge in geometry.graph.edges(node) {
            let next = edge.target();
            let next_length = length_m + edge.weight().length_m;
            let improved = lengths.get(&next).is_none_or(|&known| next_length < known);
            if improved {
                lengths.insert(next, next_length);
                predecessors.insert(next, node);
                heap.push(State {
                    length_m: next_length,
                    node: next,
                });
            }
        }
    }

    if !lengths.contains_key(&end_index) {
        return None;
    }

    let mut hops = Vec::new();
    let mut current = end_index;
    while current != start_index {
        let previous = *predecessors.get(&current)?;
        hops.push((
            geometry.graph[previous].location,
            geometry.graph[current].location,
        ));
        current = previous;
    }
    hops.reverse();
    Some(hops)
}
