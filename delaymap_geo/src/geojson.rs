// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal GeoJSON boundary reader.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned while reading boundary geometry.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The document is not a GeoJSON feature collection.
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A polygon's coordinates are not nested arrays of numbers.
    #[error("feature {feature}: invalid {geometry} coordinates")]
    InvalidCoordinates {
        /// Index of the feature in the collection.
        feature: usize,
        /// The declared geometry type.
        geometry: String,
    },
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeatureCollection {
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
    geometry: Option<GeoJsonGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

/// One boundary feature as lon/lat rings.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    /// The feature's `name` (or `NAME`) property, if any.
    pub name: Option<String>,
    /// Polygon rings (outer rings and holes alike) as `(lon, lat)` pairs.
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// Reads boundaries from a GeoJSON file.
pub fn load_boundaries(path: impl AsRef<Path>) -> Result<Vec<Boundary>, GeoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GeoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let boundaries = parse_boundaries(&text)?;
    info!(
        path = %path.display(),
        features = boundaries.len(),
        "loaded boundaries"
    );
    Ok(boundaries)
}

/// Parses a GeoJSON `FeatureCollection`, keeping `Polygon` and `MultiPolygon` features.
///
/// Other geometry types and null geometries are skipped.
pub fn parse_boundaries(text: &str) -> Result<Vec<Boundary>, GeoError> {
    let fc: GeoJsonFeatureCollection = serde_json::from_str(text)?;
    let mut out = Vec::with_capacity(fc.features.len());

    for (index, feature) in fc.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        let invalid = || GeoError::InvalidCoordinates {
            feature: index,
            geometry: geometry.ty.clone(),
        };
        let rings = match geometry.ty.as_str() {
            "Polygon" => polygon_rings(&geometry.coordinates).ok_or_else(invalid)?,
            "MultiPolygon" => {
                let polygons = geometry.coordinates.as_array().ok_or_else(invalid)?;
                let mut rings = Vec::new();
                for polygon in polygons {
                    rings.extend(polygon_rings(polygon).ok_or_else(invalid)?);
                }
                rings
            }
            other => {
                debug!(feature = index, geometry = other, "skipping non-polygon feature");
                continue;
            }
        };
        let name = feature.properties.as_ref().and_then(|props| {
            props
                .get("name")
                .or_else(|| props.get("NAME"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        });
        out.push(Boundary { name, rings });
    }

    Ok(out)
}

fn polygon_rings(value: &serde_json::Value) -> Option<Vec<Vec<(f64, f64)>>> {
    value.as_array()?.iter().map(ring_positions).collect()
}

fn ring_positions(ring: &serde_json::Value) -> Option<Vec<(f64, f64)>> {
    ring.as_array()?
        .iter()
        .map(|position| {
            let arr = position.as_array()?;
            Some((arr.first()?.as_f64()?, arr.get(1)?.as_f64()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Square" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-100, 30], [-90, 30], [-90, 40], [-100, 40], [-100, 30]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "NAME": "Islands" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[-80, 25, 0], [-79, 25, 0], [-79, 26, 0], [-80, 25, 0]]],
                        [[[-81, 25], [-80.5, 25], [-80.5, 26], [-81, 25]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": { "type": "Point", "coordinates": [-95, 35] }
            },
            { "type": "Feature", "properties": {}, "geometry": null }
        ]
    }"#;

    #[test]
    fn reads_polygons_and_multipolygons() {
        let boundaries = parse_boundaries(DOC).unwrap();
        assert_eq!(boundaries.len(), 2, "point and null geometry are skipped");
        assert_eq!(boundaries[0].name.as_deref(), Some("Square"));
        assert_eq!(boundaries[0].rings.len(), 1);
        assert_eq!(boundaries[0].rings[0][1], (-90.0, 30.0));
        assert_eq!(boundaries[1].name.as_deref(), Some("Islands"));
        assert_eq!(boundaries[1].rings.len(), 2, "one ring per polygon");
        assert_eq!(boundaries[1].rings[0][0], (-80.0, 25.0), "altitude dropped");
    }

    #[test]
    fn malformed_coordinates_are_reported() {
        let doc = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[["a","b"]]]}}
        ]}"#;
        let err = parse_boundaries(doc).unwrap_err();
        assert!(
            matches!(err, GeoError::InvalidCoordinates { feature: 0, .. }),
            "got {err}"
        );
    }

    #[test]
    fn non_collections_are_rejected() {
        assert!(matches!(
            parse_boundaries(r#"{"type":"Feature"}"#),
            Err(GeoError::Json(_))
        ));
    }
}
