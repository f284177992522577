use std::path::PathBuf;

use crate::{DEFAULT_SNAP_THRESHOLD_M, model::Metric};

/// Configuration for building a [`CampusModel`](crate::CampusModel) from
/// table and geometry files.
#[derive(Debug, Clone)]
pub struct CampusModelConfig {
    /// CSV with `node,coords` columns, coords formatted `"lat, lon"`
    pub coords_path: PathBuf,
    /// CSV with `node,is_building` columns
    pub node_type_path: PathBuf,
    /// One adjacency-matrix CSV per metric (header row and label column)
    pub metric_paths: Vec<(Metric, PathBuf)>,
    /// Optional GeoJSON file with surveyed path LineStrings
    pub geojson_path: Option<PathBuf>,
    /// Snapping distance threshold in meters
    pub snap_threshold_m: f64,
    /// Fill missing time cells from distance/gain/loss via Naismith's rule
    pub estimate_missing_times: bool,
}

impl Default for CampusModelConfig {
    fn default() -> Self {
        Self {
            coords_path: PathBuf::new(),
            node_type_path: PathBuf::new(),
            metric_paths: Vec::new(),
            geojson_path: None,
            snap_threshold_m: DEFAULT_SNAP_THRESHOLD_M,
            estimate_missing_times: false,
        }
    }
}
