// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scales used by the encoding engine.
//!
//! [`ScaleLinear`] drives the color scale (observed extent to a unit parameter), and
//! [`ScalePow`] drives bubble radii (zero-anchored domain to `[0, max_radius]`), with its
//! curvature picked by a [`ScaleKind`].

use core::fmt;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Default maximum bubble radius, in scene units.
pub const DEFAULT_MAX_RADIUS: f64 = 15.0;

/// The curvature used to map a delay value onto a bubble radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Square-root radius: the rendered circle *area* is linear in the value.
    #[default]
    Area,
    /// Radius grows with the square of the normalized value.
    ///
    /// Not area-accurate; exaggerates large values relative to small ones.
    Squared,
    /// Radius grows with the cube of the normalized value.
    ///
    /// Not area-accurate; exaggerates large values even more than [`ScaleKind::Squared`].
    Cubed,
}

impl ScaleKind {
    /// Every scale kind, in selector order.
    pub const ALL: [Self; 3] = [Self::Area, Self::Squared, Self::Cubed];

    /// The exponent applied to the normalized value.
    pub fn exponent(self) -> f64 {
        match self {
            Self::Area => 0.5,
            Self::Squared => 2.0,
            Self::Cubed => 3.0,
        }
    }

    /// Display label, as shown on the scale selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Area => "Area",
            Self::Squared => "Squared",
            Self::Cubed => "Cubed",
        }
    }

    /// Parses a selector label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain (`d0 == d1`) maps every value to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        lerp(r0, r1, t)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// A power mapping: `x^k` is mapped linearly from `domain^k` onto the range.
///
/// Negative inputs use the sign-preserving power `-|x|^k`, so the scale stays defined (and
/// monotonic) outside a non-negative domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePow {
    domain: (f64, f64),
    range: (f64, f64),
    exponent: f64,
}

impl ScalePow {
    /// Creates a new power scale.
    pub fn new(domain: (f64, f64), range: (f64, f64), exponent: f64) -> Self {
        Self {
            domain,
            range,
            exponent,
        }
    }

    /// Creates the radius scale for `kind`, mapping `[0, max]` onto `[0, max_radius]`.
    pub fn radius(kind: ScaleKind, max: f64, max_radius: f64) -> Self {
        Self::new((0.0, max), (0.0, max_radius), kind.exponent())
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps every value to the start of the range. Inputs are divided by the
    /// domain's largest magnitude before the power is applied, so `x^k` never overflows or
    /// underflows for finite domains and the domain ends map exactly onto the range ends.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let m = d0.abs().max(d1.abs());
        if m == 0.0 || !m.is_finite() {
            return r0;
        }
        let p0 = self.pow(d0 / m);
        let p1 = self.pow(d1 / m);
        let denom = p1 - p0;
        if denom == 0.0 || !denom.is_finite() {
            return r0;
        }
        let t = (self.pow(x / m) - p0) / denom;
        lerp(r0, r1, t)
    }

    /// Returns the configured exponent.
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn pow(&self, x: f64) -> f64 {
        let magnitude = if x < 0.0 { -x } else { x };
        let p = if self.exponent == 0.5 {
            magnitude.sqrt()
        } else {
            magnitude.powf(self.exponent)
        };
        if x < 0.0 { -p } else { p }
    }
}

/// Interpolates between `a` and `b`; exact at both `t == 0` and `t == 1`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_scale_maps_endpoints_to_range() {
        let s = ScaleLinear::new((10.0, 20.0), (0.0, 1.0));
        assert_eq!(s.map(10.0), 0.0, "min maps to range start");
        assert_eq!(s.map(20.0), 1.0, "max maps to range end");
        assert!((s.map(15.0) - 0.5).abs() < 1e-12, "midpoint");
    }

    #[test]
    fn degenerate_linear_domain_collapses_to_range_start() {
        let s = ScaleLinear::new((7.0, 7.0), (3.0, 9.0));
        assert_eq!(s.map(7.0), 3.0, "constant domain maps to r0");
    }

    #[test]
    fn radius_endpoints_hold_for_every_kind() {
        for kind in ScaleKind::ALL {
            for max in [0.5, 1.0, 20.0, 123.456, 1e6] {
                let s = ScalePow::radius(kind, max, DEFAULT_MAX_RADIUS);
                assert_eq!(s.map(0.0), 0.0, "{kind}: radius(0) must be 0");
                assert_eq!(s.map(max), DEFAULT_MAX_RADIUS, "{kind}: radius(max) must be R_max");
            }
        }
    }

    #[test]
    fn radius_is_monotonic() {
        for kind in ScaleKind::ALL {
            let s = ScalePow::radius(kind, 100.0, DEFAULT_MAX_RADIUS);
            let mut prev = s.map(0.0);
            for i in 1..=100 {
                let r = s.map(f64::from(i));
                assert!(r >= prev, "{kind}: radius must not decrease at {i}");
                prev = r;
            }
        }
    }

    #[test]
    fn area_radius_is_square_root() {
        let s = ScalePow::radius(ScaleKind::Area, 20.0, 15.0);
        // 15 * sqrt(10 / 20)
        assert!((s.map(10.0) - 10.606_601_717_798_213).abs() < 1e-9, "sqrt mapping");
    }

    #[test]
    fn power_kinds_order_interior_values() {
        let area = ScalePow::radius(ScaleKind::Area, 100.0, 15.0);
        let squared = ScalePow::radius(ScaleKind::Squared, 100.0, 15.0);
        let cubed = ScalePow::radius(ScaleKind::Cubed, 100.0, 15.0);
        for v in [5.0, 50.0, 99.0] {
            assert!(cubed.map(v) < squared.map(v), "cubed < squared at {v}");
            assert!(squared.map(v) < area.map(v), "squared < area at {v}");
        }
        assert!((squared.map(50.0) - 3.75).abs() < 1e-12, "15 * 0.5^2");
        assert!((cubed.map(50.0) - 1.875).abs() < 1e-12, "15 * 0.5^3");
    }

    #[test]
    fn extreme_magnitudes_keep_radius_endpoints() {
        let cases = [
            (ScaleKind::Cubed, 1e120),
            (ScaleKind::Cubed, 2e-200),
            (ScaleKind::Squared, 2e-300),
            (ScaleKind::Squared, f64::MAX),
        ];
        for (kind, max) in cases {
            let s = ScalePow::radius(kind, max, 15.0);
            assert_eq!(s.map(0.0), 0.0, "{kind} at max {max}");
            assert_eq!(s.map(max), 15.0, "{kind} at max {max}");
            let mid = s.map(max * 0.5);
            assert!(mid > 0.0 && mid < 15.0, "{kind} at max {max}: mid {mid}");
        }
    }

    #[test]
    fn zero_max_collapses_to_zero_radius() {
        for kind in ScaleKind::ALL {
            let s = ScalePow::radius(kind, 0.0, 15.0);
            assert_eq!(s.map(0.0), 0.0, "{kind}: all-zero data has invisible bubbles");
        }
    }

    #[test]
    fn negative_inputs_stay_defined() {
        let s = ScalePow::radius(ScaleKind::Area, 4.0, 10.0);
        assert_eq!(s.map(-4.0), -10.0, "sign-preserving sqrt");
    }

    #[test]
    fn scale_kind_labels_round_trip() {
        assert_eq!(ScaleKind::from_label("cubed"), Some(ScaleKind::Cubed));
        assert_eq!(ScaleKind::from_label("AREA"), Some(ScaleKind::Area));
        assert_eq!(ScaleKind::from_label("linear"), None);
    }
}
