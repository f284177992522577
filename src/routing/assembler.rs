//! Reconciles the logical edges of a found route with surveyed geometry
//!
//! Every logical edge gets a physical representation: exact stored segment
//! geometry when available, a path through the geometry graph otherwise,
//! and a straight line between node coordinates as the last resort.

use geo::{BoundingRect, Coord, LineString, Point, Rect};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::model::{GeometryGraph, LocationGraph};
use crate::routing::dijkstra::RouteResult;
use crate::routing::geometry_path::geometry_shortest_path;

/// A route reconciled with physical geometry, ready for rendering.
#[derive(Debug, Clone)]
pub struct AssembledRoute {
    /// Continuous vertex sequence in lon/lat order
    pub line: LineString<f64>,
    /// Extent of the assembled line, for framing the map view
    pub bounds: Option<Rect<f64>>,
    /// Start node name for marker placement
    pub start: Option<String>,
    /// End node name for marker placement
    pub end: Option<String>,
    /// Edges that could not be resolved to any geometry
    pub warnings: Vec<String>,
}

impl AssembledRoute {
    /// Route vertices as `(latitude, longitude)` pairs, the order the
    /// rendering contract expects.
    #[must_use]
    pub fn lat_lon_points(&self) -> Vec<(f64, f64)> {
        self.line.coords().map(|coord| (coord.y, coord.x)).collect()
    }

    /// Renders the route as a `GeoJSON` `FeatureCollection`: the route
    /// line plus start/end marker points, with the bounding extent as bbox.
    #[must_use]
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = Vec::new();

        if self.line.0.len() >= 2 {
            let value = json!({
                "type": "Feature",
                "geometry": Geometry::new(GeoJsonValue::from(&self.line)),
                "properties": {
                    "role": "route",
                    "unresolved_edges": self.warnings.len(),
                }
            });
            if let Ok(feature) = Feature::from_json_value(value) {
                features.push(feature);
            }

            for (role, name, coord) in [
                ("start", &self.start, self.line.0.first()),
                ("end", &self.end, self.line.0.last()),
            ] {
                let Some(&coord) = coord else { continue };
                let marker = json!({
                    "type": "Feature",
                    "geometry": Geometry::new(GeoJsonValue::from(&Point::from(coord))),
                    "properties": {
                        "role": role,
                        "name": name.clone().unwrap_or_default(),
                    }
                });
                if let Ok(feature) = Feature::from_json_value(marker) {
                    features.push(feature);
                }
            }
        }

        FeatureCollection {
            features,
            bbox: self
                .bounds
                .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]),
            foreign_members: None,
        }
    }
}

/// Produces one continuous coordinate sequence for the route's edges.
///
/// Per edge, in order: stored segment geometry for the unordered pair,
/// else a geometry-graph path, else a straight line between the node
/// coordinates. Edges with no geometry and no coordinates are skipped with
/// a recorded warning; assembly continues with the remaining edges.
#[must_use]
pub fn assemble_route(
    route: &RouteResult,
    locations: &LocationGraph,
    geometry: &GeometryGraph,
) -> AssembledRoute {
    let mut coords: Vec<Coord<f64>> = Vec::new();
    let mut warnings = Vec::new();

    for edge in &route.edges {
        let (Some(source), Some(target)) = (
            locations.node_id(&edge.source),
            locations.node_id(&edge.target),
        ) else {
            warn_skip(&mut warnings, &edge.id(), "unknown endpoint");
            continue;
        };

        // Exact surveyed geometry for this pair
        if let Some(segment) = geometry.oriented_coords(source, target) {
            stitch(&mut coords, segment);
            continue;
        }

        // Fallback path through the geometry graph
        if let Some(hops) = geometry_shortest_path(geometry, source, target) {
            for (from, to) in hops {
                if let Some(segment) = geometry.oriented_coords(from, to) {
                    stitch(&mut coords, segment);
                }
            }
            continue;
        }

        // Last resort: straight line between stored node coordinates
        if let (Some(from), Some(to)) =
            (locations.coordinates(source), locations.coordinates(target))
        {
            stitch(&mut coords, vec![from.into(), to.into()]);
        } else {
            warn_skip(&mut warnings, &edge.id(), "no geometry and no coordinates");
        }
    }

    let line = LineString::new(coords);
    AssembledRoute {
        bounds: line.bounding_rect(),
        start: route.edges.first().map(|edge| edge.source.clone()),
        end: route.edges.last().map(|edge| edge.target.clone()),
        warnings,
        line,
    }
}

/// Appends a segment, dropping its first vertex when it repeats the last
/// appended one so segment boundaries stay free of duplicate points.
fn stitch(coords: &mut Vec<Coord<f64>>, segment: Vec<Coord<f64>>) {
    let skip_shared = matches!(
        (coords.last(), segment.first()),
        (Some(last), Some(first)) if last == first
    );
    coords.extend(segment.into_iter().skip(usize::from(skip_shared)));
}

fn warn_skip(warnings: &mut Vec<String>, edge_id: &str, reason: &str) {
    log::warn!("skipping edge {edge_id} during assembly: {reason}");
    warnings.push(format!("{edge_id}: {reason}"));
}
