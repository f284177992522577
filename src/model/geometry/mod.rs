//! Surveyed path geometry: snapping, splitting, and the spatial graph

pub mod builder;
pub mod network;

pub use builder::{build_geometry_graph, polyline_length_m};
pub use network::{GeometryGraph, GeometryNode, GeometrySegment};
