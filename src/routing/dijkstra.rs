//! Metric-selectable shortest path over the location graph

use std::{cmp::Ordering, collections::BinaryHeap, fmt};

use hashbrown::HashMap;

use crate::model::{LocationGraph, Metric, NodeId};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap);
        // equal costs fall back to ascending node id so that tie-breaking
        // is deterministic.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One traversed logical edge of a found route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEdge {
    pub source: String,
    pub target: String,
    /// Cost of this edge for the metric the route was computed with
    pub cost: f64,
}

impl RouteEdge {
    /// `"Source-Target"` identifier, the form handed to the rendering layer.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}-{}", self.source, self.target)
    }
}

impl fmt::Display for RouteEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Result of a routing request.
///
/// "No feasible path" is an expected outcome, represented by the
/// [`unreachable`](Self::unreachable) sentinel rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Traversed edges in forward order
    pub edges: Vec<RouteEdge>,
    /// Accumulated cost for the requested metric
    pub total: f64,
}

impl RouteResult {
    /// Sentinel for routes with no feasible path.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            edges: Vec::new(),
            total: f64::INFINITY,
        }
    }

    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        self.total.is_infinite()
    }

    /// Edge identifiers in `"A-B"` form.
    #[must_use]
    pub fn edge_ids(&self) -> Vec<String> {
        self.edges.iter().map(RouteEdge::id).collect()
    }
}

/// Dijkstra's algorithm between two named locations for one metric.
///
/// Edges lacking the requested metric are treated as non-existent for the
/// query, so one graph serves time-optimal and distance-optimal routing
/// alike. Unknown start or target names yield the unreachable sentinel,
/// never an error.
#[must_use]
pub fn shortest_path(
    graph: &LocationGraph,
    start: &str,
    target: &str,
    metric: Metric,
) -> RouteResult {
    let (Some(start_id), Some(target_id)) = (graph.node_id(start), graph.node_id(target)) else {
        log::debug!("routing request references unknown node ({start} or {target})");
        return RouteResult::unreachable();
    };

    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeId, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeId, NodeId> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    distances.insert(start_id, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start_id,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == target_id {
            break;
        }

        // Skip stale queue entries
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        for &(next, metrics) in graph.connections_of(node) {
            // An edge contributes only when it carries the requested metric
            let Some(edge_cost) = metrics.get(metric) else {
                continue;
            };
            let next_cost = cost + edge_cost;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, node);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    let Some(&total) = distances.get(&target_id) else {
        return RouteResult::unreachable();
    };

    RouteResult {
        edges: reconstruct_edges(graph, &predecessors, start_id, target_id, metric),
        total,
    }
}

/// Walks predecessor links back from the target, emitting forward-ordered
/// edges with their per-edge metric cost.
fn reconstruct_edges(
    graph: &LocationGraph,
    predecessors: &HashMap<NodeId, NodeId>,
    start_id: NodeId,
    target_id: NodeId,
    metric: Metric,
) -> Vec<RouteEdge> {
    let mut edges = Vec::new();
    let mut current = target_id;
    while current != start_id {
        let Some(&previous) = predecessors.get(&current) else {
            break;
        };
        let cost = graph
            .connections_of(previous)
            .iter()
            .find(|(id, _)| *id == current)
            .and_then(|(_, metrics)| metrics.get(metric))
            .unwrap_or(f64::INFINITY);
        edges.push(RouteEdge {
            source: graph.node(previous).name.clone(),
            target: graph.node(current).name.clone(),
            cost,
        });
        current = previous;
    }
    edges.reverse();
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeMetrics;

    fn three_node_graph() -> LocationGraph {
        let mut graph = LocationGraph::new();
        graph.add_node("A", None, true);
        graph.add_node("B", None, false);
        graph.add_node("C", None, true);
        graph
            .add_edge(
                "A",
                "B",
                EdgeMetrics {
                    time: Some(120.0),
                    distance: Some(0.1),
                    ..EdgeMetrics::default()
                },
            )
            .unwrap();
        graph
            .add_edge(
                "B",
                "C",
                EdgeMetrics {
                    time: Some(180.0),
                    distance: Some(0.15),
                    ..EdgeMetrics::default()
                },
            )
            .unwrap();
        graph
    }

    #[test]
    fn finds_two_hop_time_route() {
        let graph = three_node_graph();
        let route = shortest_path(&graph, "A", "C", Metric::Time);

        assert_eq!(route.edge_ids(), vec!["A-B", "B-C"]);
        assert_eq!(route.total, 300.0);
    }

    #[test]
    fn per_edge_costs_sum_to_total() {
        let graph = three_node_graph();
        let route = shortest_path(&graph, "A", "C", Metric::Distance);

        let sum: f64 = route.edges.iter().map(|edge| edge.cost).sum();
        assert_eq!(sum, route.total);
    }

    #[test]
    fn metric_absent_everywhere_is_unreachable() {
        let graph = three_node_graph();
        let route = shortest_path(&graph, "A", "C", Metric::Gain);

        assert!(route.is_unreachable());
        assert!(route.edges.is_empty());
    }

    #[test]
    fn unknown_names_are_ordinary_failures() {
        let graph = three_node_graph();
        assert!(shortest_path(&graph, "A", "Nowhere", Metric::Time).is_unreachable());
        assert!(shortest_path(&graph, "Nowhere", "C", Metric::Time).is_unreachable());
    }

    #[test]
    fn start_equals_target_costs_nothing() {
        let graph = three_node_graph();
        let route = shortest_path(&graph, "A", "A", Metric::Time);

        assert!(route.edges.is_empty());
        assert_eq!(route.total, 0.0);
    }

    #[test]
    fn picks_cheaper_of_two_paths() {
        let mut graph = three_node_graph();
        graph
            .add_edge(
                "A",
                "C",
                EdgeMetrics {
                    time: Some(500.0),
                    ..EdgeMetrics::default()
                },
            )
            .unwrap();

        let route = shortest_path(&graph, "A", "C", Metric::Time);
        assert_eq!(route.total, 300.0);
        assert_eq!(route.edges.len(), 2);
    }

    #[test]
    fn equal_cost_paths_resolve_deterministically() {
        let mut graph = LocationGraph::new();
        for name in ["S", "X", "Y", "T"] {
            graph.add_node(name, None, false);
        }
        let hop = EdgeMetrics {
            time: Some(10.0),
            ..EdgeMetrics::default()
        };
        graph.add_edge("S", "X", hop).unwrap();
        graph.add_edge("S", "Y", hop).unwrap();
        graph.add_edge("X", "T", hop).unwrap();
        graph.add_edge("Y", "T", hop).unwrap();

        let first = shortest_path(&graph, "S", "T", Metric::Time);
        let second = shortest_path(&graph, "S", "T", Metric::Time);

        assert_eq!(first.total, 20.0);
        assert_eq!(first.edges, second.edges);
        // Ties resolve toward the lower node id, here the earlier-added X
        assert_eq!(first.edge_ids(), vec!["S-X", "X-T"]);
    }
}
