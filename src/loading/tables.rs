//! Table contract for location-graph construction
//!
//! Three kinds of CSV inputs: a coordinate table (`node,coords`), a node
//! type table (`node,is_building`), and one adjacency matrix per metric
//! where both axes are node names and a blank cell means "no edge for this
//! metric between this pair".

use std::fs::File;
use std::path::Path;

use geo::Point;
use hashbrown::{HashMap, HashSet};
use log::warn;
use serde::Deserialize;

use crate::model::{EdgeMetrics, LocationGraph, Metric};
use crate::{Error, loading::CampusModelConfig, loading::naismith::naismith_seconds};

#[derive(Debug, Deserialize)]
struct CoordRow {
    node: String,
    coords: String,
}

#[derive(Debug, Deserialize)]
struct NodeTypeRow {
    node: String,
    is_building: String,
}

fn read_rows<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path)?;
    Ok(csv::Reader::from_reader(file)
        .deserialize()
        .filter_map(Result::ok)
        .collect())
}

/// Parses a `"lat, lon"` pair. Malformed strings degrade to "coordinates
/// unknown": the node still exists, it is just excluded from snapping and
/// straight-line fallback.
fn parse_coords(node: &str, raw: &str) -> Option<Point<f64>> {
    let parsed = raw.split_once(',').and_then(|(lat, lon)| {
        Some(Point::new(
            lon.trim().parse::<f64>().ok()?,
            lat.trim().parse::<f64>().ok()?,
        ))
    });
    if parsed.is_none() {
        warn!("could not parse coords '{raw}' for node {node}, leaving unset");
    }
    parsed
}

fn parse_is_building(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Reads one adjacency-matrix CSV into the shared cell map. The first
/// header field labels the row column and is ignored; every further header
/// is a destination node name. Blank cells carry no edge.
fn read_matrix(
    path: &Path,
    metric: Metric,
    cells: &mut HashMap<(String, String), EdgeMetrics>,
    names: &mut NameOrder,
) -> Result<(), Error> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let destinations: Vec<String> = reader
        .headers()?
        .iter()
        .skip(1)
        .map(|name| name.trim().to_string())
        .collect();
    for destination in &destinations {
        names.insert(destination);
    }

    for record in reader.records() {
        let record = record?;
        let Some(source) = record.get(0).map(str::trim) else {
            continue;
        };
        names.insert(source);

        for (cell, destination) in record.iter().skip(1).zip(&destinations) {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let Ok(value) = cell.parse::<f64>() else {
                warn!("ignoring non-numeric {metric} cell '{cell}' at {source}-{destination}");
                continue;
            };
            cells
                .entry((source.to_string(), destination.clone()))
                .or_default()
                .set(metric, value);
        }
    }
    Ok(())
}

/// Tracks first-seen order of node names so arena ids stay deterministic
/// across loads of the same dataset.
#[derive(Default)]
struct NameOrder {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl NameOrder {
    fn insert(&mut self, name: &str) {
        if !name.is_empty() && self.seen.insert(name.to_string()) {
            self.ordered.push(name.to_string());
        }
    }
}

/// Loads all configured tables into a [`LocationGraph`].
///
/// The node set is the union of names across every table. A structurally
/// broken edge (an endpoint missing from that union) aborts the load.
pub(crate) fn build_location_graph(config: &CampusModelConfig) -> Result<LocationGraph, Error> {
    let coord_rows: Vec<CoordRow> = read_rows(&config.coords_path)?;
    let type_rows: Vec<NodeTypeRow> = read_rows(&config.node_type_path)?;

    let mut names = NameOrder::default();
    for row in &coord_rows {
        names.insert(row.node.trim());
    }
    for row in &type_rows {
        names.insert(row.node.trim());
    }

    let mut cells: HashMap<(String, String), EdgeMetrics> = HashMap::new();
    for (metric, path) in &config.metric_paths {
        read_matrix(path, *metric, &mut cells, &mut names)?;
    }

    if config.estimate_missing_times {
        fill_missing_times(&mut cells);
    }

    let coordinates: HashMap<&str, Option<Point<f64>>> = coord_rows
        .iter()
        .map(|row| (row.node.trim(), parse_coords(row.node.trim(), &row.coords)))
        .collect();
    let building_flags: HashMap<&str, bool> = type_rows
        .iter()
        .map(|row| (row.node.trim(), parse_is_building(&row.is_building)))
        .collect();

    let mut graph = LocationGraph::new();
    for name in &names.ordered {
        let geometry = coordinates.get(name.as_str()).copied().flatten();
        let is_building = building_flags.get(name.as_str()).copied().unwrap_or(false);
        graph.add_node(name, geometry, is_building);
    }

    // Deterministic insertion order regardless of map iteration order
    let mut edges: Vec<_> = cells.iter().collect();
    edges.sort_by(|a, b| a.0.cmp(b.0));
    for ((source, target), metrics) in edges {
        if metrics.is_empty() {
            continue;
        }
        graph.add_edge(source, target, *metrics)?;
    }

    log::info!(
        "location graph loaded: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Estimates absent time cells from the physical metrics. Surveyed times
/// are never overwritten.
fn fill_missing_times(cells: &mut HashMap<(String, String), EdgeMetrics>) {
    let mut filled = 0usize;
    for metrics in cells.values_mut() {
        if metrics.time.is_some() {
            continue;
        }
        let Some(distance_km) = metrics.distance else {
            continue;
        };
        let estimate = naismith_seconds(
            distance_km,
            metrics.gain.unwrap_or(0.0),
            metrics.loss.unwrap_or(0.0),
        );
        metrics.time = Some(estimate);
        filled += 1;
    }
    if filled > 0 {
        log::info!("estimated {filled} missing edge times via Naismith's rule");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_parse_lat_lon_order() {
        let point = parse_coords("A", "38.031, -120.3877").unwrap();
        assert_eq!(point.x(), -120.3877);
        assert_eq!(point.y(), 38.031);
    }

    #[test]
    fn malformed_coords_degrade_to_unknown() {
        assert!(parse_coords("A", "not a pair").is_none());
        assert!(parse_coords("A", "38.0").is_none());
        assert!(parse_coords("A", "38.0, east").is_none());
    }

    #[test]
    fn building_flags_accept_common_spellings() {
        assert!(parse_is_building("True"));
        assert!(parse_is_building("1"));
        assert!(parse_is_building("yes"));
        assert!(!parse_is_building("False"));
        assert!(!parse_is_building(""));
    }

    #[test]
    fn missing_times_are_estimated_not_overwritten() {
        let mut cells: HashMap<(String, String), EdgeMetrics> = HashMap::new();
        cells.insert(
            ("A".into(), "B".into()),
            EdgeMetrics {
                distance: Some(1.0),
                ..EdgeMetrics::default()
            },
        );
        cells.insert(
            ("B".into(), "C".into()),
            EdgeMetrics {
                time: Some(42.0),
                distance: Some(1.0),
                ..EdgeMetrics::default()
            },
        );

        fill_missing_times(&mut cells);

        assert_eq!(cells[&("A".into(), "B".into())].time, Some(720.0));
        assert_eq!(cells[&("B".into(), "C".into())].time, Some(42.0));
    }
}
