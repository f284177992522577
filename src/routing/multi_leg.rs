//! Chains the pathfinder across an ordered sequence of waypoints

use crate::model::{LocationGraph, Metric};
use crate::routing::dijkstra::{RouteResult, shortest_path};

/// A single routing request: start, optional ordered waypoints, end, and
/// the metric to optimize. Built per request; no component reads ambient
/// session state.
#[derive(Debug, Clone)]
pub struct RouteQuery {
    pub start: String,
    pub waypoints: Vec<String>,
    pub end: String,
    pub metric: Metric,
}

impl RouteQuery {
    #[must_use]
    pub fn direct(start: &str, end: &str, metric: Metric) -> Self {
        Self {
            start: start.to_string(),
            waypoints: Vec::new(),
            end: end.to_string(),
            metric,
        }
    }
}

/// Routes start → wp1 → … → end, concatenating leg edges and summing cost.
///
/// If any leg is unreachable the whole route is unreachable; partial legs
/// are discarded. Pure sequencing, no state between calls.
#[must_use]
pub fn multi_leg_route(graph: &LocationGraph, query: &RouteQuery) -> RouteResult {
    let mut edges = Vec::new();
    let mut total = 0.0;
    let mut current = query.start.as_str();

    for stop in query
        .waypoints
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(query.end.as_str()))
    {
        let leg = shortest_path(graph, current, stop, query.metric);
        if leg.is_unreachable() {
            log::debug!("leg {current} -> {stop} unreachable, discarding route");
            return RouteResult::unreachable();
        }
        edges.extend(leg.edges);
        total += leg.total;
        current = stop;
    }

    RouteResult { edges, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeMetrics;

    fn chain_graph() -> LocationGraph {
        let mut graph = LocationGraph::new();
        for name in ["A", "B", "C", "D"] {
            graph.add_node(name, None, false);
        }
        for (source, target, time) in [("A", "B", 120.0), ("B", "C", 180.0), ("C", "D", 60.0)] {
            graph
                .add_edge(
                    source,
                    target,
                    EdgeMetrics {
                        time: Some(time),
                        ..EdgeMetrics::default()
                    },
                )
                .unwrap();
        }
        graph
    }

    #[test]
    fn waypoint_on_the_direct_path_changes_nothing() {
        let graph = chain_graph();
        let direct = multi_leg_route(&graph, &RouteQuery::direct("A", "C", Metric::Time));

        let via = RouteQuery {
            start: "A".into(),
            waypoints: vec!["B".into()],
            end: "C".into(),
            metric: Metric::Time,
        };
        let routed = multi_leg_route(&graph, &via);

        assert_eq!(routed, direct);
        assert_eq!(routed.total, 300.0);
    }

    #[test]
    fn total_is_sum_of_leg_costs() {
        let graph = chain_graph();
        let query = RouteQuery {
            start: "A".into(),
            waypoints: vec!["C".into()],
            end: "D".into(),
            metric: Metric::Time,
        };

        let combined = multi_leg_route(&graph, &query);
        let first = shortest_path(&graph, "A", "C", Metric::Time);
        let second = shortest_path(&graph, "C", "D", Metric::Time);

        assert_eq!(combined.total, first.total + second.total);
        assert_eq!(combined.edges.len(), first.edges.len() + second.edges.len());
    }

    #[test]
    fn one_unreachable_leg_fails_the_whole_route() {
        let mut graph = chain_graph();
        graph.add_node("Island", None, false);

        let query = RouteQuery {
            start: "A".into(),
            waypoints: vec!["Island".into()],
            end: "D".into(),
            metric: Metric::Time,
        };

        let routed = multi_leg_route(&graph, &query);
        assert!(routed.is_unreachable());
        assert!(routed.edges.is_empty());
    }

    #[test]
    fn empty_waypoints_equals_single_leg() {
        let graph = chain_graph();
        let combined = multi_leg_route(&graph, &RouteQuery::direct("A", "D", Metric::Time));
        let single = shortest_path(&graph, "A", "D", Metric::Time);
        assert_eq!(combined, single);
    }
}
