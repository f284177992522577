//! The loaded campus dataset shared read-only across routing requests

use crate::model::{GeometryGraph, LocationGraph};
use crate::routing::{AssembledRoute, RouteQuery, RouteResult, assemble_route, multi_leg_route};

/// Build-time metadata kept alongside the model.
#[derive(Debug, Clone, Copy)]
pub struct CampusModelMeta {
    /// Snapping distance threshold used to build the geometry graph, meters
    pub snap_threshold_m: f64,
}

/// A location graph and its companion geometry graph, built once per
/// dataset and immutable afterwards. Concurrent routing requests against
/// the same model are safe because no request mutates shared state.
#[derive(Debug, Clone)]
pub struct CampusModel {
    pub locations: LocationGraph,
    pub geometry: GeometryGraph,
    pub meta: CampusModelMeta,
}

impl CampusModel {
    /// Computes a (possibly multi-leg) route for the query.
    #[must_use]
    pub fn route(&self, query: &RouteQuery) -> RouteResult {
        multi_leg_route(&self.locations, query)
    }

    /// Reconciles a found route with surveyed path geometry.
    #[must_use]
    pub fn assemble(&self, route: &RouteResult) -> AssembledRoute {
        assemble_route(route, &self.locations, &self.geometry)
    }
}
