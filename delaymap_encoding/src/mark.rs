// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable-identity marks and the diffs a [`Scene`](crate::Scene) emits for them.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;

/// Stable mark identity.
///
/// Identity is what lets a renderer update an existing bubble in place when the selection
/// changes instead of tearing it down and re-creating it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    const ROW_NAMESPACE: u64 = 1 << 63;

    /// Creates an id from a raw value (guides, titles, base-map features).
    pub fn from_raw(raw: u64) -> Self {
        Self(raw & !Self::ROW_NAMESPACE)
    }

    /// Creates the id of the per-row mark for `row_key`.
    ///
    /// Row ids live in their own namespace and never collide with [`MarkId::from_raw`] ids.
    pub fn for_row(row_key: u64) -> Self {
        Self(Self::ROW_NAMESPACE | row_key)
    }

    /// Returns the row key if this is a per-row id.
    pub fn row_key(self) -> Option<u64> {
        (self.0 & Self::ROW_NAMESPACE != 0).then_some(self.0 & !Self::ROW_NAMESPACE)
    }
}

/// The geometric kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// A filled/stroked circle.
    Circle,
    /// An arbitrary path.
    Path,
    /// Unshaped text.
    Text,
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    #[default]
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Anchor is the vertical middle of the text.
    #[default]
    Middle,
    /// Anchor is the alphabetic baseline.
    Alphabetic,
    /// Anchor is the top of the text.
    Hanging,
}

/// Resolved mark geometry and paint.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A circle.
    Circle {
        /// Center in scene coordinates.
        center: Point,
        /// Radius in scene units.
        radius: f64,
        /// Fill paint.
        fill: Brush,
        /// Stroke paint.
        stroke: Brush,
        /// Stroke width; `0` disables the stroke.
        stroke_width: f64,
    },
    /// A path.
    Path {
        /// Path geometry in scene coordinates.
        path: BezPath,
        /// Fill paint.
        fill: Brush,
        /// Stroke paint.
        stroke: Brush,
        /// Stroke width; `0` disables the stroke.
        stroke_width: f64,
    },
    /// A text run.
    Text {
        /// Anchor position.
        pos: Point,
        /// The string to draw.
        text: String,
        /// Font size in scene units.
        font_size: f64,
        /// Fill paint.
        fill: Brush,
        /// Horizontal anchoring.
        anchor: TextAnchor,
        /// Vertical anchoring.
        baseline: TextBaseline,
    },
}

impl MarkPayload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Circle { .. } => MarkKind::Circle,
            Self::Path { .. } => MarkKind::Path,
            Self::Text { .. } => MarkKind::Text,
        }
    }

    /// Geometric bounds, including half the stroke width.
    ///
    /// Text has no intrinsic bounds without a measurer and returns `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Circle {
                center,
                radius,
                stroke_width,
                ..
            } => {
                let r = radius + stroke_width * 0.5;
                Some(Rect::new(
                    center.x - r,
                    center.y - r,
                    center.x + r,
                    center.y + r,
                ))
            }
            Self::Path {
                path, stroke_width, ..
            } => Some(path.bounding_box().inflate(stroke_width * 0.5, stroke_width * 0.5)),
            Self::Text { .. } => None,
        }
    }
}

/// A mark: identity, paint order hint, optional hover title and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Render ordering hint, e.g. [`BUBBLES`](crate::BUBBLES).
    pub z_index: i32,
    /// Hover tooltip text.
    pub title: Option<String>,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a filled circle mark with no stroke.
    pub fn circle(id: MarkId, center: Point, radius: f64, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Circle {
                center,
                radius,
                fill: fill.into(),
                stroke: Brush::default(),
                stroke_width: 0.0,
            },
        )
    }

    /// Creates a filled path mark with no stroke.
    pub fn path(id: MarkId, path: BezPath, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Path {
                path,
                fill: fill.into(),
                stroke: Brush::default(),
                stroke_width: 0.0,
            },
        )
    }

    /// Creates a text mark anchored at `pos` (start, middle).
    pub fn text(
        id: MarkId,
        pos: Point,
        text: impl Into<String>,
        font_size: f64,
        fill: impl Into<Brush>,
    ) -> Self {
        Self::new(
            id,
            MarkPayload::Text {
                pos,
                text: text.into(),
                font_size,
                fill: fill.into(),
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
            },
        )
    }

    fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            title: None,
            payload,
        }
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the hover title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the stroke paint and width (circles and paths only).
    pub fn with_stroke(mut self, paint: impl Into<Brush>, width: f64) -> Self {
        match &mut self.payload {
            MarkPayload::Circle {
                stroke,
                stroke_width,
                ..
            }
            | MarkPayload::Path {
                stroke,
                stroke_width,
                ..
            } => {
                *stroke = paint.into();
                *stroke_width = width;
            }
            MarkPayload::Text { .. } => {}
        }
        self
    }

    /// Sets text anchoring (text only).
    pub fn with_text_anchor(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text {
            anchor: a,
            baseline: b,
            ..
        } = &mut self.payload
        {
            *a = anchor;
            *b = baseline;
        }
        self
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

/// A change between two successive mark sets.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark appeared.
    Enter {
        /// Mark identity.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// The new mark.
        new: Box<Mark>,
    },
    /// A mark changed paint, geometry, title or z-index.
    Update {
        /// Mark identity.
        id: MarkId,
        /// Mark kind after the update.
        kind: MarkKind,
        /// The previous mark.
        old: Box<Mark>,
        /// The new mark.
        new: Box<Mark>,
    },
    /// A mark disappeared.
    Exit {
        /// Mark identity.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// The removed mark.
        old: Box<Mark>,
    },
}

impl MarkDiff {
    /// Returns the id of the affected mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn row_ids_do_not_collide_with_raw_ids() {
        let row = MarkId::for_row(7);
        let raw = MarkId::from_raw(7);
        assert_ne!(row, raw);
        assert_eq!(row.row_key(), Some(7));
        assert_eq!(raw.row_key(), None);
    }

    #[test]
    fn circle_bounds_include_half_stroke() {
        let m = Mark::circle(MarkId::from_raw(1), Point::new(10.0, 10.0), 4.0, css::RED)
            .with_stroke(css::BLACK, 2.0);
        assert_eq!(m.payload.bounds(), Some(Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert_eq!(m.kind(), MarkKind::Circle);
    }

    #[test]
    fn text_has_no_intrinsic_bounds() {
        let m = Mark::text(MarkId::from_raw(2), Point::ZERO, "JFK", 10.0, css::BLACK);
        assert_eq!(m.payload.bounds(), None);
    }
}
