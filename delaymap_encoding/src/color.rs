// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-stop color scales.

use peniko::Color;
use peniko::color::palette::css;

use crate::extent::Extent;
use crate::scale::ScaleLinear;

/// A two-stop color gradient (start at the domain minimum, end at the maximum).
#[derive(Clone, Copy, Debug)]
pub struct ColorGradient {
    /// Color for the domain minimum.
    pub start: Color,
    /// Color for the domain maximum.
    pub end: Color,
}

impl ColorGradient {
    /// Creates a gradient from `start` to `end`.
    pub fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }

    /// Samples the gradient at `t`, clamped to `[0, 1]`.
    ///
    /// Interpolation is per-channel in (non-premultiplied) sRGB, so every channel stays between
    /// the two stops' values. `t == 0` and `t == 1` return the stops exactly.
    pub fn sample(&self, t: f64) -> Color {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "t is clamped to [0, 1], well within f32 precision needs"
        )]
        let t = t.clamp(0.0, 1.0) as f32;
        let a = self.start.components;
        let b = self.end.components;
        let mut out = [0.0_f32; 4];
        for (i, c) in out.iter_mut().enumerate() {
            // f32 rounding can step past a stop when both stops share a channel value.
            let (lo, hi) = (a[i].min(b[i]), a[i].max(b[i]));
            *c = (a[i] * (1.0 - t) + b[i] * t).clamp(lo, hi);
        }
        Color::new(out)
    }
}

impl Default for ColorGradient {
    /// Yellow to red.
    fn default() -> Self {
        Self::new(css::YELLOW, css::RED)
    }
}

/// A linear color scale over an observed extent.
#[derive(Clone, Copy, Debug)]
pub struct ColorScale {
    scale: ScaleLinear,
    gradient: ColorGradient,
}

impl ColorScale {
    /// Creates a color scale mapping `extent` linearly onto `gradient`.
    ///
    /// A degenerate extent (`min == max`) maps every value to the gradient start.
    pub fn new(extent: Extent, gradient: ColorGradient) -> Self {
        Self {
            scale: ScaleLinear::new((extent.min, extent.max), (0.0, 1.0)),
            gradient,
        }
    }

    /// Maps a value onto a color.
    pub fn map(&self, value: f64) -> Color {
        self.gradient.sample(self.scale.map(value))
    }

    /// Returns the gradient stops.
    pub fn gradient(&self) -> ColorGradient {
        self.gradient
    }

    /// Returns the `(min, max)` domain.
    pub fn domain(&self) -> (f64, f64) {
        self.scale.domain()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn extent(min: f64, max: f64) -> Extent {
        Extent { min, max }
    }

    #[test]
    fn endpoints_map_to_gradient_stops() {
        let gradient = ColorGradient::default();
        let s = ColorScale::new(extent(3.5, 41.0), gradient);
        assert_eq!(s.map(3.5).components, gradient.start.components, "min -> start");
        assert_eq!(s.map(41.0).components, gradient.end.components, "max -> end");
    }

    #[test]
    fn channels_stay_within_stops() {
        let gradient = ColorGradient::new(
            Color::from_rgba8(250, 20, 100, 255),
            Color::from_rgba8(10, 200, 100, 128),
        );
        let s = ColorScale::new(extent(0.0, 10.0), gradient);
        for i in 0..=100 {
            let c = s.map(f64::from(i) * 0.1).components;
            for ch in 0..4 {
                let lo = gradient.start.components[ch].min(gradient.end.components[ch]);
                let hi = gradient.start.components[ch].max(gradient.end.components[ch]);
                assert!(c[ch] >= lo && c[ch] <= hi, "channel {ch} out of range at {i}");
            }
        }
    }

    #[test]
    fn shared_channel_value_is_preserved_exactly() {
        let gradient = ColorGradient::new(
            Color::from_rgba8(250, 20, 100, 255),
            Color::from_rgba8(10, 200, 100, 255),
        );
        let blue = gradient.start.components[2];
        for i in 0..=1000 {
            let c = gradient.sample(f64::from(i) / 1000.0).components;
            assert_eq!(c[2], blue, "blue drifted at t = {i}/1000");
            assert_eq!(c[3], 1.0, "alpha drifted at t = {i}/1000");
        }
    }

    #[test]
    fn out_of_extent_values_are_clamped() {
        let gradient = ColorGradient::default();
        let s = ColorScale::new(extent(10.0, 20.0), gradient);
        assert_eq!(s.map(-5.0).components, gradient.start.components, "below min");
        assert_eq!(s.map(99.0).components, gradient.end.components, "above max");
    }

    #[test]
    fn degenerate_extent_uses_start_color() {
        let gradient = ColorGradient::default();
        let s = ColorScale::new(extent(12.0, 12.0), gradient);
        let c = s.map(12.0);
        assert_eq!(c.components, gradient.start.components, "constant data -> start");
        assert!(c.components.iter().all(|v| v.is_finite()), "finite output");
    }

    #[test]
    fn midpoint_is_halfway() {
        let s = ColorScale::new(extent(0.0, 2.0), ColorGradient::default());
        let mid = s.map(1.0).to_rgba8();
        // yellow (255, 255, 0) -> red (255, 0, 0)
        assert_eq!(mid.r, 255, "red channel constant");
        assert!((127..=128).contains(&mid.g), "green halfway, got {}", mid.g);
        assert_eq!(mid.b, 0, "blue channel constant");
    }
}
