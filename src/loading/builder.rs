use log::info;

use crate::model::{CampusModel, CampusModelMeta, build_geometry_graph};
use crate::{Error, loading::CampusModelConfig};

use super::features::load_geometry_features;
use super::tables::build_location_graph;

/// Builds a campus model from the configured tables and geometry file.
///
/// # Errors
///
/// Returns an error if any input file is missing, unreadable, or
/// structurally broken (an edge naming an unknown node aborts the load).
pub fn create_campus_model(config: &CampusModelConfig) -> Result<CampusModel, Error> {
    validate_config(config)?;

    info!("loading location tables");
    let locations = build_location_graph(config)?;

    let polylines = match &config.geojson_path {
        Some(path) => {
            info!("loading surveyed geometry: {}", path.display());
            load_geometry_features(path)?
        }
        None => Vec::new(),
    };

    let geometry = build_geometry_graph(&locations, &polylines, config.snap_threshold_m);
    validate_geometry_coverage(&locations, polylines.len(), geometry.node_count());

    info!(
        "campus model ready: {} locations, {} geometry segments",
        locations.node_count(),
        geometry.segment_count()
    );

    Ok(CampusModel {
        locations,
        geometry,
        meta: CampusModelMeta {
            snap_threshold_m: config.snap_threshold_m,
        },
    })
}

fn validate_config(config: &CampusModelConfig) -> Result<(), Error> {
    for path in [&config.coords_path, &config.node_type_path]
        .into_iter()
        .chain(config.metric_paths.iter().map(|(_, path)| path))
        .chain(config.geojson_path.iter())
    {
        if !path.exists() {
            return Err(Error::InvalidData(format!(
                "input file not found: {}",
                path.display()
            )));
        }
    }
    if !(config.snap_threshold_m > 0.0) {
        return Err(Error::InvalidData(format!(
            "snap threshold must be positive, got {}",
            config.snap_threshold_m
        )));
    }
    Ok(())
}

/// Surveyed polylines that snap to no located node usually indicate the
/// tables and the geometry file describe different places.
fn validate_geometry_coverage(
    locations: &crate::model::LocationGraph,
    polyline_count: usize,
    covered_nodes: usize,
) {
    let located = locations.located_nodes().count();
    if polyline_count > 0 && covered_nodes == 0 {
        log::warn!(
            "none of the {located} located nodes were reached by any of the \
            {polyline_count} surveyed polylines; routes will fall back to straight lines"
        );
    }
}
