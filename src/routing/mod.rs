//! Routing algorithms: metric shortest path, waypoint sequencing, and
//! geometry reconciliation

pub mod assembler;
pub mod dijkstra;
pub mod geometry_path;
pub mod multi_leg;

pub use assembler::{AssembledRoute, assemble_route};
pub use dijkstra::{RouteEdge, RouteResult, shortest_path};
pub use geometry_path::geometry_shortest_path;
pub use multi_leg::{RouteQuery, multi_leg_route};
