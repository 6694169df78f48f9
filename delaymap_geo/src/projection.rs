// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Albers equal-area conic projections.
//!
//! Follows the `d3` convention: rotate the longitude, project onto the cone, shift the
//! projected `center` onto `translate`, then scale with y pointing down. [`AlbersUsa`] composes
//! three of them so Alaska and Hawaii are drawn as insets below the lower 48.

use kurbo::{Point, Rect};

/// Maps `(lon, lat)` in degrees onto scene coordinates.
pub trait Projection {
    /// Returns `None` when the point is not drawn by this projection.
    fn project(&self, lon: f64, lat: f64) -> Option<Point>;
}

/// An Albers equal-area conic projection with an optional lon/lat clip box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlbersProjection {
    n: f64,
    c: f64,
    r0: f64,
    rotate: f64,
    center: (f64, f64),
    scale: f64,
    translate: Point,
    clip: Option<Rect>,
}

impl AlbersProjection {
    /// Creates a projection with standard parallels `parallels` (degrees).
    ///
    /// `rotate` is added to every longitude; `center` is the `(lon, lat)` (after rotation) that
    /// lands on `translate`.
    pub fn new(
        parallels: (f64, f64),
        rotate: f64,
        center: (f64, f64),
        scale: f64,
        translate: Point,
    ) -> Self {
        let sy0 = parallels.0.to_radians().sin();
        let sy1 = parallels.1.to_radians().sin();
        let mut n = (sy0 + sy1) / 2.0;
        if n.abs() < 1e-9 {
            // Parallels symmetric about the equator; avoid dividing by zero.
            n = 1e-9_f64.copysign(if n == 0.0 { 1.0 } else { n });
        }
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;
        Self {
            n,
            c,
            r0,
            rotate,
            center,
            scale,
            translate,
            clip: None,
        }
    }

    /// The contiguous United States, sized for a 761×444 canvas.
    ///
    /// Points outside the lower-48 lon/lat box project to `None`; [`AlbersUsa`] adds the Alaska
    /// and Hawaii insets.
    pub fn lower48() -> Self {
        Self::new(
            (29.5, 45.5),
            96.0,
            (-0.6, 38.7),
            975.0,
            Point::new(761.0 / 2.0, 444.0 / 2.0),
        )
        .with_clip(Rect::new(-125.0, 24.0, -66.0, 50.0))
    }

    /// Restricts projection to a lon/lat box (`x` = lon, `y` = lat, degrees).
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Sets the scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the screen position of the projection center.
    pub fn with_translate(mut self, translate: Point) -> Self {
        self.translate = translate;
        self
    }

    /// Projects `(lon, lat)` in degrees onto scene coordinates.
    ///
    /// Returns `None` for non-finite input, latitudes beyond the poles, or points outside the
    /// clip box.
    pub fn project(&self, lon: f64, lat: f64) -> Option<Point> {
        if !lon.is_finite() || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        if let Some(clip) = self.clip {
            if lon < clip.x0 || lon > clip.x1 || lat < clip.y0 || lat > clip.y1 {
                return None;
            }
        }
        let (x, y) = self.raw(wrap_degrees(lon + self.rotate), lat);
        let (cx, cy) = self.raw(self.center.0, self.center.1);
        Some(Point::new(
            self.translate.x + self.scale * (x - cx),
            self.translate.y - self.scale * (y - cy),
        ))
    }

    fn raw(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lambda = lon.to_radians();
        let phi = lat.to_radians();
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let theta = lambda * self.n;
        (r * theta.sin(), self.r0 - r * theta.cos())
    }
}

impl Projection for AlbersProjection {
    fn project(&self, lon: f64, lat: f64) -> Option<Point> {
        Self::project(self, lon, lat)
    }
}

/// The lower 48 with Alaska and Hawaii insets, in the layout of `d3.geo.albersUsa`.
///
/// Each point is tried against the lower-48, Alaska and Hawaii projections in turn; the first
/// whose result falls inside that projection's screen extent wins. Points landing in none of the
/// extents (Puerto Rico, other countries) are not drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlbersUsa {
    insets: [(AlbersProjection, Rect); 3],
}

impl AlbersUsa {
    /// Creates the composite with lower-48 scale `scale`, centered on `translate`.
    ///
    /// Alaska is drawn at 0.35 of the lower-48 scale; Hawaii at the same scale.
    pub fn new(scale: f64, translate: Point) -> Self {
        let k = scale;
        let (x, y) = (translate.x, translate.y);
        let eps = 1e-6;
        let lower48 = AlbersProjection::new((29.5, 45.5), 96.0, (-0.6, 38.7), k, translate);
        let alaska = AlbersProjection::new(
            (55.0, 65.0),
            154.0,
            (-2.0, 58.5),
            0.35 * k,
            Point::new(x - 0.307 * k, y + 0.201 * k),
        );
        let hawaii = AlbersProjection::new(
            (8.0, 18.0),
            157.0,
            (-3.0, 19.9),
            k,
            Point::new(x - 0.205 * k, y + 0.212 * k),
        );
        Self {
            insets: [
                (
                    lower48,
                    Rect::new(x - 0.455 * k, y - 0.238 * k, x + 0.455 * k, y + 0.238 * k),
                ),
                (
                    alaska,
                    Rect::new(
                        x - 0.425 * k + eps,
                        y + 0.120 * k + eps,
                        x - 0.214 * k - eps,
                        y + 0.234 * k - eps,
                    ),
                ),
                (
                    hawaii,
                    Rect::new(
                        x - 0.214 * k + eps,
                        y + 0.166 * k + eps,
                        x - 0.115 * k - eps,
                        y + 0.234 * k - eps,
                    ),
                ),
            ],
        }
    }
}

impl Default for AlbersUsa {
    /// Sized for a 761×444 canvas, matching [`AlbersProjection::lower48`].
    fn default() -> Self {
        Self::new(975.0, Point::new(761.0 / 2.0, 444.0 / 2.0))
    }
}

impl Projection for AlbersUsa {
    fn project(&self, lon: f64, lat: f64) -> Option<Point> {
        self.insets.iter().find_map(|(projection, extent)| {
            projection
                .project(lon, lat)
                .filter(|p| extent.contains(*p))
        })
    }
}

fn wrap_degrees(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}
