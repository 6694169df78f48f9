// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label sizes for placing the bubble legend.
//!
//! The legend needs the width of its longest "N minutes/flight" label before it can be placed
//! right of the map, and the SVG writer needs label extents to size its view box. Neither has a
//! font shaper, so both take a [`TextMeasurer`].

/// Estimates the box a single-line label occupies.
pub trait TextMeasurer {
    /// Returns `(width, height)` of `text` at `font_size`, in scene units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Measures labels by character count.
///
/// Each character is `0.6 × font_size` wide and a line is `font_size` tall, which is close
/// enough for the short numeric legend labels and the captions.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

const GLYPH_WIDTH_EM: f64 = 0.6;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let glyphs = text.chars().count() as f64;
        (GLYPH_WIDTH_EM * font_size * glyphs, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_label_width_scales_with_length_and_size() {
        let m = HeuristicTextMeasurer;
        // "12 minutes/flight" is 17 characters.
        let (w, h) = m.measure("12 minutes/flight", 10.0);
        assert!((w - 102.0).abs() < 1e-9, "width {w}");
        assert_eq!(h, 10.0);
        let (wide, _) = m.measure("12 minutes/flight", 20.0);
        assert!((wide - 2.0 * w).abs() < 1e-9);
        assert_eq!(m.measure("", 12.0), (0.0, 12.0));
        // Characters, not bytes.
        assert_eq!(m.measure("é", 10.0).0, m.measure("e", 10.0).0);
    }
}
