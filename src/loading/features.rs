//! GeoJSON input for the geometry builder
//!
//! Surveyed features arrive as a `FeatureCollection`. LineStrings are the
//! walkable paths the routing core cares about; polygons are building
//! outlines consumed only by the rendering layer and are skipped here.

use std::fs;
use std::path::Path;

use geo::{Coord, LineString};
use geojson::{GeoJson, Value};
use log::{debug, trace};

use crate::Error;

/// Reads surveyed path polylines from a GeoJSON file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not valid GeoJSON.
pub fn load_geometry_features(path: &Path) -> Result<Vec<LineString<f64>>, Error> {
    let raw = fs::read_to_string(path)?;
    polylines_from_geojson(&raw)
}

/// Extracts every LineString (and each part of a MultiLineString) from a
/// GeoJSON document; all other geometry types are ignored.
pub fn polylines_from_geojson(raw: &str) -> Result<Vec<LineString<f64>>, Error> {
    let geojson = raw
        .parse::<GeoJson>()
        .map_err(|e| Error::GeoJsonError(e.to_string()))?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(Error::GeoJsonError(
            "expected a FeatureCollection".to_string(),
        ));
    };

    let mut polylines = Vec::new();
    for feature in collection.features {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        match geometry.value {
            Value::LineString(positions) => polylines.push(positions_to_line(&positions)),
            Value::MultiLineString(parts) => {
                polylines.extend(parts.iter().map(|part| positions_to_line(part)));
            }
            _ => trace!("ignoring non-path geometry feature"),
        }
    }

    debug!("loaded {} surveyed polylines", polylines.len());
    Ok(polylines)
}

fn positions_to_line(positions: &[Vec<f64>]) -> LineString<f64> {
    LineString::new(
        positions
            .iter()
            .filter(|position| position.len() >= 2)
            .map(|position| Coord {
                x: position[0],
                y: position[1],
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMPUS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"type": "dorm"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0,0],[0,1],[1,1],[0,0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-120.39, 38.03], [-120.388, 38.031]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [
                        [[0,0],[0,1]],
                        [[1,0],[1,1]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn linestrings_are_kept_and_polygons_ignored() {
        let polylines = polylines_from_geojson(CAMPUS).unwrap();
        assert_eq!(polylines.len(), 3);
        assert_eq!(
            polylines[0].coords().next(),
            Some(&Coord {
                x: -120.39,
                y: 38.03
            })
        );
    }

    #[test]
    fn non_collection_documents_are_rejected() {
        let err = polylines_from_geojson(r#"{"type":"Point","coordinates":[0,0]}"#).unwrap_err();
        assert!(matches!(err, Error::GeoJsonError(_)));
    }
}
