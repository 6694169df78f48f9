// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Brush;
use peniko::color::palette::css;

use crate::dataset::{CategoryId, Dataset};
use crate::engine::{Encoding, Tooltip};
use crate::mark::{Mark, MarkId};
use crate::z_order;

/// Row indices ordered by descending `category` value, ties broken by row.
///
/// Painting in this order keeps small bubbles on top of large ones, so every airport stays
/// hoverable.
pub fn draw_order(dataset: &Dataset, category: CategoryId) -> Vec<usize> {
    let records = dataset.records();
    let mut rows: Vec<usize> = (0..records.len()).collect();
    rows.sort_by(|&a, &b| {
        let va = records[a].value(category).unwrap_or(f64::NEG_INFINITY);
        let vb = records[b].value(category).unwrap_or(f64::NEG_INFINITY);
        vb.total_cmp(&va).then(a.cmp(&b))
    });
    rows
}

/// Generates one circle per airport, sized and colored by an [`Encoding`].
///
/// Mark identity is derived from the record's row, so a selection change updates bubbles in
/// place.
#[derive(Clone, Debug)]
pub struct BubbleMarkSpec {
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width; `0` disables the outline.
    pub stroke_width: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl Default for BubbleMarkSpec {
    fn default() -> Self {
        Self {
            stroke: css::BLACK.with_alpha(0.6).into(),
            stroke_width: 0.5,
            z_index: z_order::BUBBLES,
        }
    }
}

impl BubbleMarkSpec {
    /// Creates a spec with a thin translucent black outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the outline.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = width.max(0.0);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates bubble marks in [`draw_order`].
    ///
    /// `positions` is aligned with `dataset.records()`; rows without a position (e.g. outside
    /// the projection) are skipped. `title` formats each bubble's hover text.
    pub fn marks(
        &self,
        dataset: &Dataset,
        encoding: &Encoding,
        positions: &[Option<Point>],
        title: impl Fn(&Tooltip<'_>) -> String,
    ) -> Vec<Mark> {
        let category = encoding.selection().category;
        let Some(category_name) = dataset.category_name(category) else {
            return Vec::new();
        };
        let records = dataset.records();

        draw_order(dataset, category)
            .into_iter()
            .filter_map(|row| {
                let center = (*positions.get(row)?)?;
                let record = &records[row];
                let value = record.value(category)?;
                let tooltip = Tooltip {
                    airport: &record.airport,
                    category: category_name,
                    value,
                };
                Some(
                    Mark::circle(
                        MarkId::for_row(row as u64),
                        center,
                        encoding.radius_of(value).max(0.0),
                        encoding.color_of(value),
                    )
                    .with_stroke(self.stroke.clone(), self.stroke_width)
                    .with_z_index(self.z_index)
                    .with_title(title(&tooltip)),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::dataset::Record;
    use crate::engine::{EncodingConfig, Selection, encode};
    use crate::mark::{MarkDiff, MarkPayload};
    use crate::scale::ScaleKind;
    use crate::scene::Scene;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["Total Delays".to_string(), "Carrier".to_string()],
            vec![
                Record::new("AAA", -80.0, 30.0, vec![10.0, 4.0]),
                Record::new("BBB", -90.0, 40.0, vec![20.0, 1.0]),
                Record::new("CCC", -100.0, 35.0, vec![15.0, 4.0]),
            ],
        )
        .unwrap()
    }

    fn positions() -> Vec<Option<Point>> {
        vec![
            Some(Point::new(1.0, 1.0)),
            Some(Point::new(2.0, 2.0)),
            Some(Point::new(3.0, 3.0)),
        ]
    }

    fn label(t: &Tooltip<'_>) -> String {
        alloc::format!("{}: {}", t.airport, t.value)
    }

    #[test]
    fn draw_order_is_descending_with_stable_ties() {
        let ds = dataset();
        assert_eq!(draw_order(&ds, CategoryId(0)), vec![1, 2, 0]);
        assert_eq!(draw_order(&ds, CategoryId(1)), vec![0, 2, 1]);
    }

    #[test]
    fn bubbles_follow_the_encoding() {
        let ds = dataset();
        let enc = encode(
            &ds,
            Selection::new(CategoryId(0), ScaleKind::Area),
            &EncodingConfig::default(),
        )
        .unwrap();
        let marks = BubbleMarkSpec::new().marks(&ds, &enc, &positions(), label);
        assert_eq!(marks.len(), 3);
        assert_eq!(marks[0].id, MarkId::for_row(1), "largest first");
        assert_eq!(marks[0].title.as_deref(), Some("BBB: 20"));
        let MarkPayload::Circle { radius, center, .. } = &marks[0].payload else {
            panic!("bubbles are circles");
        };
        assert_eq!(*radius, 15.0);
        assert_eq!(*center, Point::new(2.0, 2.0));
    }

    #[test]
    fn rows_without_position_are_skipped() {
        let ds = dataset();
        let enc = encode(
            &ds,
            Selection::new(CategoryId(0), ScaleKind::Area),
            &EncodingConfig::default(),
        )
        .unwrap();
        let mut pos = positions();
        pos[2] = None;
        let marks = BubbleMarkSpec::new().marks(&ds, &enc, &pos, label);
        assert_eq!(marks.len(), 2);
        assert!(marks.iter().all(|m| m.id != MarkId::for_row(2)));
    }

    #[test]
    fn selection_change_updates_in_place_and_redraw_is_idempotent() {
        let ds = dataset();
        let config = EncodingConfig::default();
        let spec = BubbleMarkSpec::new();
        let mut scene = Scene::new();

        let area = encode(&ds, Selection::new(CategoryId(0), ScaleKind::Area), &config).unwrap();
        let enters = scene.tick(spec.marks(&ds, &area, &positions(), label));
        assert!(enters.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));

        let again = scene.tick(spec.marks(&ds, &area, &positions(), label));
        assert!(again.is_empty(), "same selection, no diffs");

        let cubed = encode(&ds, Selection::new(CategoryId(0), ScaleKind::Cubed), &config).unwrap();
        let diffs = scene.tick(spec.marks(&ds, &cubed, &positions(), label));
        // The max bubble keeps radius 15 and its color; the other two shrink.
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Update { .. })));
    }
}
