//! Builds the geometry graph by snapping surveyed polylines to known nodes
//!
//! Surveyed trail data rarely has vertices exactly at named-location
//! coordinates. Snapping vertices to the nearest node within a distance
//! threshold is what connects semantic nodes to physically drawn paths.

use geo::{Coord, Distance, Haversine, LineString, Point};
use itertools::Itertools;
use log::{debug, trace};
use rayon::prelude::*;
use rstar::{RTree, primitives::GeomWithData};

use crate::model::{GeometryGraph, GeometrySegment, LocationGraph, NodeId};

type IndexedPoint = GeomWithData<[f64; 2], NodeId>;

/// Snaps polyline vertices to located graph nodes within a threshold.
struct NodeSnapper {
    tree: RTree<IndexedPoint>,
    threshold_m: f64,
}

impl NodeSnapper {
    fn new(locations: &LocationGraph, threshold_m: f64) -> Self {
        let points: Vec<IndexedPoint> = locations
            .located_nodes()
            .map(|(id, point)| IndexedPoint::new([point.x(), point.y()], id))
            .collect();
        Self {
            tree: RTree::bulk_load(points),
            threshold_m,
        }
    }

    /// Nearest located node within the threshold, great-circle measured.
    fn snap(&self, coord: Coord<f64>) -> Option<(NodeId, Point<f64>)> {
        let nearest = self.tree.nearest_neighbor(&[coord.x, coord.y])?;
        let node_point = Point::new(nearest.geom()[0], nearest.geom()[1]);
        let distance = Haversine.distance(Point::from(coord), node_point);
        (distance <= self.threshold_m).then_some((nearest.data, node_point))
    }
}

/// Builds the spatial segment graph from raw surveyed polylines.
///
/// Each polyline is split at vertices that snap to a located node; every
/// resulting sub-segment whose two ends resolve to distinct nodes becomes a
/// [`GeometrySegment`]. Sub-segments that fail to resolve (spurs that stop
/// short of any recognized node) or that loop back to the same node are
/// dropped without error.
#[must_use]
pub fn build_geometry_graph(
    locations: &LocationGraph,
    polylines: &[LineString<f64>],
    threshold_m: f64,
) -> GeometryGraph {
    let snapper = NodeSnapper::new(locations, threshold_m);

    // Segment extraction is independent per polyline; insertion stays
    // sequential so that last-built-wins stays deterministic.
    let extracted: Vec<Vec<SplitSegment>> = polylines
        .par_iter()
        .map(|line| split_polyline(line, &snapper))
        .collect();

    let mut graph = GeometryGraph::new();
    for segment in extracted.into_iter().flatten() {
        graph.insert_segment(segment.start, segment.end, segment.segment);
    }

    debug!(
        "geometry graph built: {} nodes, {} segments from {} polylines",
        graph.node_count(),
        graph.segment_count(),
        polylines.len()
    );
    graph
}

struct SplitSegment {
    start: (NodeId, Point<f64>),
    end: (NodeId, Point<f64>),
    segment: GeometrySegment,
}

fn split_polyline(line: &LineString<f64>, snapper: &NodeSnapper) -> Vec<SplitSegment> {
    let coords = &line.0;
    if coords.len() < 2 {
        trace!("skipping degenerate polyline with {} points", coords.len());
        return Vec::new();
    }

    // Both endpoints are always breakpoints; interior vertices only when
    // they snap to a known node.
    let last = coords.len() - 1;
    let mut breakpoints = vec![0];
    for (index, &coord) in coords.iter().enumerate().take(last).skip(1) {
        if snapper.snap(coord).is_some() {
            breakpoints.push(index);
        }
    }
    breakpoints.push(last);

    let mut segments = Vec::with_capacity(breakpoints.len() - 1);
    for (&from, &to) in breakpoints.iter().tuple_windows() {
        let slice = &coords[from..=to];
        let (Some(start), Some(end)) = (snapper.snap(slice[0]), snapper.snap(slice[to - from]))
        else {
            trace!("dropping sub-segment with unresolved endpoint");
            continue;
        };
        if start.0 == end.0 {
            trace!("dropping sub-segment looping back to node {}", start.0);
            continue;
        }

        segments.push(SplitSegment {
            start,
            end,
            segment: GeometrySegment {
                line: LineString::from(slice.to_vec()),
                length_m: polyline_length_m(slice),
            },
        });
    }
    segments
}

/// Summed great-circle length of consecutive vertex pairs, meters.
#[must_use]
pub fn polyline_length_m(coords: &[Coord<f64>]) -> f64 {
    coords
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| Haversine.distance(Point::from(a), Point::from(b)))
        .sum()
}
