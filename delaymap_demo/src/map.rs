// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition of the delay map: base layer, bubbles, legend and captions.

use delaymap_encoding::{
    BubbleLegendSpec, BubbleMarkSpec, CategoryId, Dataset, Encoding, HeuristicTextMeasurer,
    LegendBubble, Mark, MarkId, TITLES, TextAnchor, TextBaseline, Tooltip,
};
use delaymap_geo::{BaseMapSpec, Boundary, Projection};
use kurbo::{Point, Rect};
use peniko::color::palette::css;

/// Page heading.
pub(crate) const TITLE: &str = "Flights Originating in the East Are More Delayed";
/// Page subheading.
pub(crate) const SUBTITLE: &str = "Mean Delay Time per Flight for Selected Categories at US \
                                   Airports with 25+ Flights per Day (2006-2016)";
/// Data source name.
pub(crate) const SOURCE: &str = "Bureau of Transportation Statistics";
/// Data source link.
pub(crate) const SOURCE_URL: &str = "http://www.transtats.bts.gov/OT_Delay/OT_DelayCause1.asp";

/// The projected map canvas.
pub(crate) const FRAME: Rect = Rect::new(0.0, 0.0, 761.0, 444.0);

const LEGEND_ID_BASE: u64 = 1_000_000;
const CAPTION_ID_BASE: u64 = 2_000_000;

/// Legend label: the value rounded to two decimals.
pub(crate) fn legend_label(value: f64) -> String {
    format!("{} minutes/flight", (value * 100.0).round() / 100.0)
}

/// Hover text for one bubble.
pub(crate) fn tooltip_text(tooltip: &Tooltip<'_>) -> String {
    format!(
        "{}\nAverage minutes of {} delays per flight: {}",
        tooltip.airport, tooltip.category, tooltip.value
    )
}

/// Projected record positions and the static layers drawn under and around the bubbles.
#[derive(Debug)]
pub(crate) struct MapLayout {
    positions: Vec<Option<Point>>,
    base: Vec<Mark>,
    bubbles: BubbleMarkSpec,
}

impl MapLayout {
    /// Projects every record; records the projection does not draw get no position.
    pub(crate) fn new(
        dataset: &Dataset,
        boundaries: &[Boundary],
        projection: &impl Projection,
    ) -> Self {
        let positions: Vec<_> = dataset
            .records()
            .iter()
            .map(|r| projection.project(r.lon, r.lat))
            .collect();
        let skipped = positions.iter().filter(|p| p.is_none()).count();
        if skipped > 0 {
            tracing::warn!(skipped, "airports outside the projection are not drawn");
        }
        let base = BaseMapSpec::new(0).marks(boundaries, projection);
        Self {
            positions,
            base,
            bubbles: BubbleMarkSpec::new(),
        }
    }

    /// Base-map paths; they do not depend on the selection.
    pub(crate) fn base_marks(&self) -> &[Mark] {
        &self.base
    }

    /// Bubbles and legend for one encoding.
    pub(crate) fn selection_marks(&self, dataset: &Dataset, encoding: &Encoding) -> Vec<Mark> {
        let mut out = self
            .bubbles
            .marks(dataset, encoding, &self.positions, tooltip_text);
        out.extend(legend(encoding));
        out
    }
}

/// A bubble legend to the right of the map frame.
fn legend(encoding: &Encoding) -> Vec<Mark> {
    let items = encoding
        .legend_entries()
        .iter()
        .map(|entry| LegendBubble::from_entry(entry, legend_label(entry.value)))
        .collect();
    let spec = BubbleLegendSpec::new(LEGEND_ID_BASE, items)
        .with_slot_radius(encoding.radius_scale().range().1);
    let size = spec.measure(&HeuristicTextMeasurer);
    let top = (FRAME.height() - size.height).max(0.0) * 0.5;
    spec.marks(Point::new(FRAME.x1 + 10.0, top))
}

/// Title, subtitle and source line placed above and below the map frame.
pub(crate) fn captions() -> Vec<Mark> {
    let caption = |i: u64, pos: Point, text: &str, size: f64| {
        Mark::text(
            MarkId::from_raw(CAPTION_ID_BASE + i),
            pos,
            text,
            size,
            css::BLACK,
        )
        .with_text_anchor(TextAnchor::Start, TextBaseline::Alphabetic)
        .with_z_index(TITLES)
    };
    vec![
        caption(0, Point::new(0.0, -30.0), TITLE, 18.0),
        caption(1, Point::new(0.0, -12.0), SUBTITLE, 11.0),
        caption(
            2,
            Point::new(0.0, FRAME.y1 + 18.0),
            &format!("Source: {SOURCE}"),
            10.0,
        ),
    ]
}

/// Resolves a category name against the dataset, listing the valid names on failure.
pub(crate) fn resolve_category(dataset: &Dataset, name: &str) -> anyhow::Result<CategoryId> {
    dataset.category_id(name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown delay category `{name}`; expected one of: {}",
            dataset.categories().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use delaymap_encoding::{EncodingConfig, MarkPayload, Record, ScaleKind, Selection, encode};
    use delaymap_geo::{AlbersProjection, AlbersUsa};

    use super::*;

    fn two_airports() -> Dataset {
        Dataset::new(
            vec!["Total Delays".to_string()],
            vec![
                Record::new("AAA", -80.0, 30.0, vec![10.0]),
                Record::new("BBB", -90.0, 40.0, vec![20.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn labels_round_to_two_decimals() {
        assert_eq!(legend_label(10.0), "10 minutes/flight");
        assert_eq!(legend_label(12.345_678), "12.35 minutes/flight");
        assert_eq!(legend_label(7.5), "7.5 minutes/flight");
    }

    #[test]
    fn tooltip_names_airport_category_and_value() {
        let t = Tooltip {
            airport: "ATL",
            category: "Weather",
            value: 0.75,
        };
        assert_eq!(
            tooltip_text(&t),
            "ATL\nAverage minutes of Weather delays per flight: 0.75"
        );
    }

    #[test]
    fn selection_marks_hold_bubbles_and_legend() {
        let ds = two_airports();
        let layout = MapLayout::new(&ds, &[], &AlbersProjection::lower48());
        let enc = encode(
            &ds,
            Selection::new(CategoryId(0), ScaleKind::Area),
            &EncodingConfig::default(),
        )
        .unwrap();
        let marks = layout.selection_marks(&ds, &enc);
        // Two bubbles, six legend rows of bubble + label.
        assert_eq!(marks.len(), 2 + 12);
        let labels: Vec<_> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels.first(), Some(&"10 minutes/flight"));
        assert_eq!(labels.last(), Some(&"20 minutes/flight"));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let ds = two_airports();
        assert_eq!(resolve_category(&ds, "Total Delays").unwrap(), CategoryId(0));
        let err = resolve_category(&ds, "Security").unwrap_err();
        assert!(err.to_string().contains("Total Delays"), "{err}");
    }

    #[test]
    fn captions_sit_outside_the_frame() {
        let marks = captions();
        assert_eq!(marks.len(), 3);
        assert!(marks.iter().all(|m| m.z_index == TITLES));
        for mark in &marks {
            let MarkPayload::Text { pos, .. } = &mark.payload else {
                panic!("captions are text");
            };
            assert!(pos.y < FRAME.y0 || pos.y > FRAME.y1, "caption at {pos:?}");
        }
    }

    #[test]
    fn airports_outside_the_projection_have_no_bubble() {
        let ds = Dataset::new(
            vec!["Total Delays".to_string()],
            vec![
                Record::new("ANC", -149.9, 61.2, vec![12.0]),
                Record::new("ATL", -84.4, 33.6, vec![14.0]),
                Record::new("HNL", -157.9, 21.3, vec![9.0]),
                Record::new("SJU", -66.0, 18.4, vec![11.0]),
            ],
        )
        .unwrap();
        let enc = encode(
            &ds,
            Selection::new(CategoryId(0), ScaleKind::Area),
            &EncodingConfig::default(),
        )
        .unwrap();
        let bubble_centers = |layout: &MapLayout| -> Vec<(usize, kurbo::Point)> {
            layout
                .selection_marks(&ds, &enc)
                .into_iter()
                .filter_map(|m| match (m.id.row_key(), m.payload) {
                    (Some(row), MarkPayload::Circle { center, .. }) => Some((row as usize, center)),
                    _ => None,
                })
                .collect()
        };

        let lower48 = MapLayout::new(&ds, &[], &AlbersProjection::lower48());
        assert_eq!(bubble_centers(&lower48).len(), 1, "only ATL in the lower 48");

        let usa = MapLayout::new(&ds, &[], &AlbersUsa::default());
        let mut drawn = bubble_centers(&usa);
        drawn.sort_by_key(|(row, _)| *row);
        let rows: Vec<_> = drawn.iter().map(|(row, _)| *row).collect();
        assert_eq!(rows, [0, 1, 2], "Alaska and Hawaii insets are drawn, Puerto Rico is not");
        for (row, center) in drawn {
            assert!(FRAME.contains(center), "row {row} at {center:?}");
        }
    }
}
