// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base-map path marks.

use delaymap_encoding::{BASE_MAP, Mark, MarkId};
use kurbo::BezPath;
use peniko::Brush;
use peniko::color::palette::css;
use tracing::{debug, warn};

use crate::geojson::Boundary;
use crate::projection::Projection;

/// Generates one path mark per boundary.
///
/// The base map is static: it is drawn once and never re-encoded when the selection changes.
#[derive(Clone, Debug)]
pub struct BaseMapSpec {
    /// Id of the first path; boundary `i` gets `id_base + i`.
    pub id_base: u64,
    /// Land fill.
    pub fill: Brush,
    /// Border paint.
    pub stroke: Brush,
    /// Border width.
    pub stroke_width: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl Default for BaseMapSpec {
    fn default() -> Self {
        Self {
            id_base: 0,
            fill: css::WHITE.into(),
            stroke: css::BLACK.into(),
            stroke_width: 0.5,
            z_index: BASE_MAP,
        }
    }
}

impl BaseMapSpec {
    /// Creates a white map with thin black borders.
    pub fn new(id_base: u64) -> Self {
        Self {
            id_base,
            ..Self::default()
        }
    }

    /// Sets the land fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the border paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = width.max(0.0);
        self
    }

    /// Projects `boundaries` and generates their path marks.
    ///
    /// Points the projection rejects are dropped; rings left with fewer than three points are
    /// skipped, and boundaries with no drawable ring produce no mark.
    pub fn marks(&self, boundaries: &[Boundary], projection: &impl Projection) -> Vec<Mark> {
        let mut out = Vec::with_capacity(boundaries.len());
        for (i, boundary) in boundaries.iter().enumerate() {
            let path = boundary_path(boundary, projection);
            if path.elements().is_empty() {
                debug!(
                    index = i,
                    name = boundary.name.as_deref().unwrap_or(""),
                    "boundary outside projection"
                );
                continue;
            }
            out.push(
                Mark::path(MarkId::from_raw(self.id_base + i as u64), path, self.fill.clone())
                    .with_stroke(self.stroke.clone(), self.stroke_width)
                    .with_z_index(self.z_index),
            );
        }
        if out.len() < boundaries.len() {
            warn!(
                drawn = out.len(),
                total = boundaries.len(),
                "some boundaries could not be projected"
            );
        }
        out
    }
}

fn boundary_path(boundary: &Boundary, projection: &impl Projection) -> BezPath {
    let mut path = BezPath::new();
    for ring in &boundary.rings {
        let mut points = ring
            .iter()
            .filter_map(|&(lon, lat)| projection.project(lon, lat));
        let Some(first) = points.next() else {
            continue;
        };
        let rest: Vec<_> = points.collect();
        if rest.len() < 2 {
            continue;
        }
        path.move_to(first);
        for p in rest {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
mod tests {
    use kurbo::{PathEl, Shape};

    use super::*;
    use crate::projection::{AlbersProjection, AlbersUsa};
    use delaymap_encoding::MarkPayload;

    fn square(name: &str, lon: f64, lat: f64) -> Boundary {
        Boundary {
            name: Some(name.to_string()),
            rings: vec![vec![
                (lon, lat),
                (lon + 2.0, lat),
                (lon + 2.0, lat + 2.0),
                (lon, lat + 2.0),
                (lon, lat),
            ]],
        }
    }

    #[test]
    fn one_closed_path_per_boundary() {
        let projection = AlbersProjection::lower48();
        let marks = BaseMapSpec::new(500).marks(
            &[square("A", -100.0, 35.0), square("B", -90.0, 35.0)],
            &projection,
        );
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].id, MarkId::from_raw(500));
        assert_eq!(marks[1].id, MarkId::from_raw(501));
        assert_eq!(marks[0].z_index, BASE_MAP);
        let MarkPayload::Path {
            path, stroke_width, ..
        } = &marks[0].payload
        else {
            panic!("base map marks are paths");
        };
        assert_eq!(*stroke_width, 0.5);
        assert!(matches!(path.elements().first(), Some(PathEl::MoveTo(_))));
        assert!(matches!(path.elements().last(), Some(PathEl::ClosePath)));
        assert!(path.bounding_box().area() > 0.0);
    }

    #[test]
    fn unprojectable_boundaries_are_skipped() {
        let projection = AlbersProjection::lower48();
        let alaska = square("AK", -150.0, 60.0);
        let marks = BaseMapSpec::new(0).marks(&[alaska, square("B", -90.0, 35.0)], &projection);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].id, MarkId::from_raw(1), "ids follow the input index");
    }

    #[test]
    fn composite_projection_draws_alaska() {
        let alaska = square("AK", -150.0, 60.0);
        let marks = BaseMapSpec::new(0).marks(
            &[alaska, square("B", -90.0, 35.0)],
            &AlbersUsa::default(),
        );
        assert_eq!(marks.len(), 2);
        let bounds = marks[0].payload.bounds().unwrap();
        assert!(bounds.y0 > 339.0, "Alaska inset below the lower 48: {bounds:?}");
    }

    #[test]
    fn degenerate_rings_are_dropped() {
        let projection = AlbersProjection::lower48();
        let sliver = Boundary {
            name: None,
            rings: vec![vec![(-100.0, 35.0), (-99.0, 35.0)], vec![(-150.0, 60.0); 4]],
        };
        assert!(BaseMapSpec::new(0).marks(&[sliver], &projection).is_empty());
    }
}
