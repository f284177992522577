//! Data model for campus wayfinding
//!
//! Contains the location graph, the per-edge metric vectors, and the
//! geometry graph built from surveyed paths.

pub mod campus_model;
pub mod geometry;
pub mod location_graph;
pub mod metrics;

pub use campus_model::{CampusModel, CampusModelMeta};
pub use geometry::{GeometryGraph, GeometryNode, GeometrySegment, build_geometry_graph};
pub use location_graph::{LocationGraph, Node, NodeId};
pub use metrics::{EdgeMetrics, Metric};
