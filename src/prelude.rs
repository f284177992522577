//! Convenience re-exports of the crate's main entry points.

pub use crate::DEFAULT_SNAP_THRESHOLD_M;
pub use crate::error::Error;
pub use crate::loading::{CampusModelConfig, create_campus_model};
pub use crate::model::{CampusModel, EdgeMetrics, LocationGraph, Metric};
pub use crate::routing::{
    AssembledRoute, RouteQuery, RouteResult, assemble_route, multi_leg_route, shortest_path,
};
