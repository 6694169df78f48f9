// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data-driven visual encoding for airport delay bubble maps.
//!
//! Given a [`Dataset`] and a [`Selection`] (delay category + [`ScaleKind`]), this crate computes:
//! - a **radius scale** over the zero-anchored domain `[0, max]`,
//! - a **color scale** over the observed extent `[min, max]`, and
//! - **legend samples** spanning the extent, consistent with both scales.
//!
//! The result ([`Encoding`]) is recomputed in full on every selection change. On top of that,
//! the crate generates stable-identity marks (bubbles, legend rows) and a tiny [`Scene`] that
//! diffs successive mark sets, so a renderer only has to apply `Enter`/`Update`/`Exit` changes.
//!
//! Rendering (SVG, HTML, GPU) is out of scope; marks store geometry, paint and unshaped text.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bubble_mark;
mod color;
mod dataset;
mod engine;
mod extent;
#[cfg(not(feature = "std"))]
mod float;
mod legend;
mod mark;
mod measure;
mod scale;
mod scene;
mod z_order;

pub use bubble_mark::{BubbleMarkSpec, draw_order};
pub use color::{ColorGradient, ColorScale};
pub use dataset::{CategoryId, Dataset, DatasetError, Record};
pub use engine::{
    EncodeError, Encoding, EncodingConfig, EncodingEngine, EngineError, EngineState, Selection,
    Tooltip, encode,
};
pub use extent::{Extent, resolve_extent};
pub use legend::{
    BubbleLegend, BubbleLegendSpec, DEFAULT_LEGEND_DIVISIONS, LegendBubble, LegendEntry,
    LegendSamples, legend_samples,
};
pub use mark::{Mark, MarkDiff, MarkId, MarkKind, MarkPayload, TextAnchor, TextBaseline};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use scale::{DEFAULT_MAX_RADIUS, ScaleKind, ScaleLinear, ScalePow};
pub use scene::Scene;
pub use z_order::*;
