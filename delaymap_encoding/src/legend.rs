// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend sampling and legend mark generation.
//!
//! A legend explains both visual channels at once: each row is a bubble drawn with the radius
//! *and* color the active encoding assigns to a representative value, next to a text label.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use smallvec::SmallVec;

use crate::extent::Extent;
use crate::mark::{Mark, MarkId, MarkPayload, TextAnchor, TextBaseline};
use crate::measure::TextMeasurer;
use crate::z_order;

/// Default number of equal divisions of the extent (six samples).
pub const DEFAULT_LEGEND_DIVISIONS: usize = 5;

/// Legend sample values; inline for the usual handful of rows.
pub type LegendSamples = SmallVec<[f64; 8]>;

/// Divides the closed extent into `divisions` equal steps and returns `divisions + 1` samples.
///
/// Samples are computed from the step index rather than accumulated, clamped to `max`, and the
/// last one is `max` itself, so the sequence always ends exactly on the true maximum and never
/// decreases. A degenerate extent yields `divisions + 1` copies of its value. `divisions` is at
/// least 1.
pub fn legend_samples(extent: Extent, divisions: usize) -> LegendSamples {
    let divisions = divisions.max(1);
    let span = extent.span();
    let mut out = LegendSamples::with_capacity(divisions + 1);
    for i in 0..divisions {
        let v = extent.min + span * i as f64 / divisions as f64;
        out.push(v.min(extent.max));
    }
    out.push(extent.max);
    out
}

/// A legend sample paired with its visual encoding.
#[derive(Clone, Copy, Debug)]
pub struct LegendEntry {
    /// The sampled data value.
    pub value: f64,
    /// Bubble radius for `value`.
    pub radius: f64,
    /// Bubble fill for `value`.
    pub fill: Color,
}

/// One legend row: a labelled bubble.
#[derive(Clone, Debug)]
pub struct LegendBubble {
    /// The label shown next to the bubble.
    pub label: String,
    /// Bubble radius.
    pub radius: f64,
    /// Bubble fill.
    pub fill: Brush,
}

impl LegendBubble {
    /// Builds a row from an encoded entry and a label.
    pub fn from_entry(entry: &LegendEntry, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            radius: entry.radius,
            fill: Brush::Solid(entry.fill),
        }
    }
}

/// A positioned bubble legend: a vertical list of bubbles with text labels.
#[derive(Clone, Debug)]
pub struct BubbleLegend {
    /// Stable-id base; row `i` uses `id_base + 2i` for its bubble and `id_base + 2i + 1` for its
    /// label.
    pub id_base: u64,
    /// Legend origin (top-left).
    pub origin: Point,
    /// Radius reserved for every symbol slot, so bubbles line up on one axis.
    pub slot_radius: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between symbol slot and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Bubble outline.
    pub stroke: Brush,
    /// Bubble outline width.
    pub stroke_width: f64,
    /// Rows in display order.
    pub items: Vec<LegendBubble>,
}

impl BubbleLegend {
    /// Generates legend marks (bubble + label per row).
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2);
        let row_height = self.row_height();
        for (i, item) in self.items.iter().enumerate() {
            let y = self.origin.y + i as f64 * (row_height + self.row_gap);
            let center = Point::new(self.origin.x + self.slot_radius, y + row_height * 0.5);

            out.push(
                Mark::circle(
                    MarkId::from_raw(self.id_base + 2 * i as u64),
                    center,
                    item.radius.max(0.0),
                    item.fill.clone(),
                )
                .with_stroke(self.stroke.clone(), self.stroke_width)
                .with_z_index(z_order::LEGEND_SYMBOLS),
            );

            out.push(
                Mark::text(
                    MarkId::from_raw(self.id_base + 2 * i as u64 + 1),
                    Point::new(
                        self.origin.x + 2.0 * self.slot_radius + self.label_dx,
                        center.y,
                    ),
                    item.label.clone(),
                    self.font_size,
                    self.text_fill.clone(),
                )
                .with_text_anchor(TextAnchor::Start, TextBaseline::Middle)
                .with_z_index(z_order::LEGEND_LABELS),
            );
        }
        out
    }

    fn row_height(&self) -> f64 {
        (2.0 * self.slot_radius).max(self.font_size)
    }

    /// Estimates legend bounds using the provided text measurer.
    pub fn bounds(&self, measurer: &impl TextMeasurer) -> Rect {
        let mut bounds: Option<Rect> = None;
        for mark in self.marks() {
            let b = match &mark.payload {
                MarkPayload::Text {
                    pos,
                    text,
                    font_size,
                    anchor,
                    baseline,
                    ..
                } => text_bounds(*pos, measurer.measure(text, *font_size), *anchor, *baseline),
                // Reserve the full slot so bounds don't depend on the current values.
                MarkPayload::Circle { center, .. } => Rect::new(
                    center.x - self.slot_radius,
                    center.y - self.slot_radius,
                    center.x + self.slot_radius,
                    center.y + self.slot_radius,
                ),
                MarkPayload::Path { .. } => continue,
            };
            bounds = Some(match bounds {
                None => b,
                Some(r) => r.union(b),
            });
        }
        bounds.unwrap_or_else(|| Rect::from_origin_size(self.origin, Size::ZERO))
    }
}

/// An unpositioned bubble legend.
///
/// Use this with a measure/arrange layout pass:
/// - Measure: call [`BubbleLegendSpec::measure`] to get a desired size.
/// - Arrange: call [`BubbleLegendSpec::at`] once you know the origin.
#[derive(Clone, Debug)]
pub struct BubbleLegendSpec {
    /// Stable-id base; row `i` uses `id_base + 2i` for its bubble and `id_base + 2i + 1` for its
    /// label.
    pub id_base: u64,
    /// Radius reserved for every symbol slot.
    pub slot_radius: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between symbol slot and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Bubble outline.
    pub stroke: Brush,
    /// Bubble outline width.
    pub stroke_width: f64,
    /// Rows in display order.
    pub items: Vec<LegendBubble>,
}

impl BubbleLegendSpec {
    /// Creates a legend description with defaults.
    ///
    /// The slot radius defaults to the largest item radius.
    pub fn new(id_base: u64, items: Vec<LegendBubble>) -> Self {
        let slot_radius = items.iter().fold(0.0_f64, |acc, item| acc.max(item.radius));
        Self {
            id_base,
            slot_radius,
            row_gap: 8.0,
            label_dx: 8.0,
            font_size: 11.0,
            text_fill: css::BLACK.into(),
            stroke: css::BLACK.with_alpha(0.5).into(),
            stroke_width: 0.5,
            items,
        }
    }

    /// Sets the reserved symbol slot radius.
    pub fn with_slot_radius(mut self, slot_radius: f64) -> Self {
        self.slot_radius = slot_radius.max(0.0);
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the label text paint.
    pub fn with_text_fill(mut self, text_fill: impl Into<Brush>) -> Self {
        self.text_fill = text_fill.into();
        self
    }

    /// Sets the vertical gap between rows.
    pub fn with_row_gap(mut self, row_gap: f64) -> Self {
        self.row_gap = row_gap.max(0.0);
        self
    }

    /// Measures the desired legend size.
    pub fn measure(&self, measurer: &impl TextMeasurer) -> Size {
        self.at(Point::ZERO).bounds(measurer).size()
    }

    /// Creates a positioned legend at the given origin.
    pub fn at(&self, origin: Point) -> BubbleLegend {
        BubbleLegend {
            id_base: self.id_base,
            origin,
            slot_radius: self.slot_radius,
            row_gap: self.row_gap,
            label_dx: self.label_dx,
            font_size: self.font_size,
            text_fill: self.text_fill.clone(),
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
            items: self.items.clone(),
        }
    }

    /// Generates marks for this legend at the given origin.
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        self.at(origin).marks()
    }
}

fn text_bounds(pos: Point, size: (f64, f64), anchor: TextAnchor, baseline: TextBaseline) -> Rect {
    let (w, h) = size;
    let (x0, x1) = match anchor {
        TextAnchor::Start => (pos.x, pos.x + w),
        TextAnchor::Middle => (pos.x - w * 0.5, pos.x + w * 0.5),
        TextAnchor::End => (pos.x - w, pos.x),
    };
    let (y0, y1) = match baseline {
        TextBaseline::Middle => (pos.y - h * 0.5, pos.y + h * 0.5),
        TextBaseline::Alphabetic => (pos.y - h, pos.y),
        TextBaseline::Hanging => (pos.y, pos.y + h),
    };
    Rect::new(x0, y0, x1, y1)
}
