//! Campus wayfinding core
//!
//! Computes walkable routes between named locations on a small site,
//! optimizing over one of several interchangeable cost metrics (travel
//! time, distance, elevation gain or loss), then reconciles the abstract
//! shortest path with surveyed path geometry so it renders as one
//! continuous line.
//!
//! The model is built once per dataset via [`loading::create_campus_model`]
//! and shared read-only across routing requests; a [`RouteQuery`] describes
//! one request and produces a [`RouteResult`] plus, through the assembler,
//! an [`AssembledRoute`] for the rendering layer.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{
    CampusModel, EdgeMetrics, GeometryGraph, LocationGraph, Metric, Node, NodeId,
    build_geometry_graph,
};
pub use routing::{
    AssembledRoute, RouteEdge, RouteQuery, RouteResult, assemble_route, multi_leg_route,
    shortest_path,
};

/// Default snapping distance between a surveyed vertex and a named node,
/// in meters of great-circle distance.
pub const DEFAULT_SNAP_THRESHOLD_M: f64 = 5.0;
