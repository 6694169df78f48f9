// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The encoding engine: selection in, radius/color/legend out.
//!
//! [`encode`] is the pure recompute. [`EncodingEngine`] wraps it in the load-once /
//! select-many protocol a presentation shell drives:
//!
//! ```text
//! Uninitialized --load--> Ready --select--> Ready --select--> ...
//! ```
//!
//! Every `select` is a full recompute over the whole dataset; nothing is cached per category.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;

use crate::color::{ColorGradient, ColorScale};
use crate::dataset::{CategoryId, Dataset};
use crate::extent::{Extent, resolve_extent};
use crate::legend::{DEFAULT_LEGEND_DIVISIONS, LegendEntry, LegendSamples, legend_samples};
use crate::scale::{DEFAULT_MAX_RADIUS, ScaleKind, ScalePow};

/// What the user picked: a delay category and a radius curvature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    /// The delay category driving both channels.
    pub category: CategoryId,
    /// The radius curvature.
    pub scale: ScaleKind,
}

impl Selection {
    /// Creates a selection.
    pub fn new(category: CategoryId, scale: ScaleKind) -> Self {
        Self { category, scale }
    }
}

/// Presentation constants that shape an [`Encoding`].
#[derive(Clone, Copy, Debug)]
pub struct EncodingConfig {
    /// Radius of the bubble for the largest value.
    pub max_radius: f64,
    /// Color stops for the observed extent.
    pub gradient: ColorGradient,
    /// Number of equal legend divisions (samples = divisions + 1).
    pub legend_divisions: usize,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            max_radius: DEFAULT_MAX_RADIUS,
            gradient: ColorGradient::default(),
            legend_divisions: DEFAULT_LEGEND_DIVISIONS,
        }
    }
}

impl EncodingConfig {
    /// Sets the maximum bubble radius.
    pub fn with_max_radius(mut self, max_radius: f64) -> Self {
        self.max_radius = max_radius.max(0.0);
        self
    }

    /// Sets the color gradient.
    pub fn with_gradient(mut self, gradient: ColorGradient) -> Self {
        self.gradient = gradient;
        self
    }

    /// Sets the number of legend divisions (at least 1).
    pub fn with_legend_divisions(mut self, divisions: usize) -> Self {
        self.legend_divisions = divisions.max(1);
        self
    }
}

/// Errors that halt a recompute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The dataset has no values to encode.
    EmptyDataset,
    /// The selected category does not exist in the dataset.
    UnknownCategory(CategoryId),
    /// A record holds a NaN or infinite value for the selected category.
    NonFiniteValue {
        /// The offending airport.
        airport: String,
        /// The selected category.
        category: CategoryId,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDataset => f.write_str("dataset has no values to encode"),
            Self::UnknownCategory(id) => write!(f, "unknown category index {}", id.0),
            Self::NonFiniteValue { airport, category } => write!(
                f,
                "airport `{airport}` has a non-finite value for category index {}",
                category.0
            ),
        }
    }
}

impl core::error::Error for EncodeError {}

/// The visual encoding for one selection.
///
/// Immutable: a new selection produces a new `Encoding`.
#[derive(Clone, Debug)]
pub struct Encoding {
    selection: Selection,
    extent: Extent,
    radius: ScalePow,
    color: ColorScale,
    samples: LegendSamples,
}

impl Encoding {
    /// Bubble radius for `value`.
    pub fn radius_of(&self, value: f64) -> f64 {
        self.radius.map(value)
    }

    /// Bubble fill for `value`.
    pub fn color_of(&self, value: f64) -> Color {
        self.color.map(value)
    }

    /// The selection this encoding was computed for.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Observed `[min, max]` of the selected category (color domain).
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Zero-anchored `[0, max]` radius domain.
    pub fn radius_domain(&self) -> Extent {
        self.extent.zero_anchored()
    }

    /// The radius scale.
    pub fn radius_scale(&self) -> &ScalePow {
        &self.radius
    }

    /// The color scale.
    pub fn color_scale(&self) -> &ColorScale {
        &self.color
    }

    /// Legend sample values, from `min` to exactly `max`.
    pub fn legend_samples(&self) -> &[f64] {
        &self.samples
    }

    /// Legend samples paired with their radius and color.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.samples
            .iter()
            .map(|&value| LegendEntry {
                value,
                radius: self.radius_of(value),
                fill: self.color_of(value),
            })
            .collect()
    }
}

/// Computes the full encoding for `selection` over `dataset`.
pub fn encode(
    dataset: &Dataset,
    selection: Selection,
    config: &EncodingConfig,
) -> Result<Encoding, EncodeError> {
    let extent = resolve_extent(dataset, selection.category)?;
    let radius = ScalePow::radius(selection.scale, extent.max, config.max_radius);
    let color = ColorScale::new(extent, config.gradient);
    let samples = legend_samples(extent, config.legend_divisions);
    Ok(Encoding {
        selection,
        extent,
        radius,
        color,
        samples,
    })
}

/// Values a shell needs to describe one airport on hover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tooltip<'a> {
    /// Airport code.
    pub airport: &'a str,
    /// Selected category name.
    pub category: &'a str,
    /// Value of the selected category.
    pub value: f64,
}

/// Lifecycle state of an [`EncodingEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No dataset yet.
    Uninitialized,
    /// A dataset is loaded and an encoding is current.
    Ready,
}

/// Errors returned by [`EncodingEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// `select` was called before `load`.
    Uninitialized,
    /// `load` was called twice; the dataset is loaded once per session.
    AlreadyLoaded,
    /// The recompute failed; the previous encoding (if any) stays current.
    Encode(EncodeError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("no dataset has been loaded"),
            Self::AlreadyLoaded => f.write_str("a dataset is already loaded"),
            Self::Encode(err) => write!(f, "encoding failed: {err}"),
        }
    }
}

impl core::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EncodeError> for EngineError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

#[derive(Debug)]
struct Ready {
    dataset: Dataset,
    encoding: Encoding,
}

/// Drives the load-once / select-many protocol.
#[derive(Debug)]
pub struct EncodingEngine {
    config: EncodingConfig,
    ready: Option<Ready>,
}

impl EncodingEngine {
    /// Creates an engine with no dataset.
    pub fn new(config: EncodingConfig) -> Self {
        Self {
            config,
            ready: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        if self.ready.is_some() {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    /// The engine's presentation constants.
    pub fn config(&self) -> &EncodingConfig {
        &self.config
    }

    /// Takes ownership of the dataset and computes the initial encoding.
    ///
    /// This is the single `Uninitialized -> Ready` transition. On error the engine stays
    /// uninitialized.
    pub fn load(
        &mut self,
        dataset: Dataset,
        selection: Selection,
    ) -> Result<&Encoding, EngineError> {
        if self.ready.is_some() {
            return Err(EngineError::AlreadyLoaded);
        }
        let encoding = encode(&dataset, selection, &self.config)?;
        let ready = self.ready.insert(Ready { dataset, encoding });
        Ok(&ready.encoding)
    }

    /// Handles a selection change with a full recompute.
    ///
    /// On error the previous encoding stays current.
    pub fn select(&mut self, selection: Selection) -> Result<&Encoding, EngineError> {
        let ready = self.ready.as_mut().ok_or(EngineError::Uninitialized)?;
        ready.encoding = encode(&ready.dataset, selection, &self.config)?;
        Ok(&ready.encoding)
    }

    /// The current encoding, once ready.
    pub fn encoding(&self) -> Option<&Encoding> {
        self.ready.as_ref().map(|r| &r.encoding)
    }

    /// The loaded dataset, once ready.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.ready.as_ref().map(|r| &r.dataset)
    }

    /// The current selection, once ready.
    pub fn selection(&self) -> Option<Selection> {
        self.encoding().map(Encoding::selection)
    }

    /// Tooltip values for the record at `row` under the current selection.
    pub fn tooltip(&self, row: usize) -> Option<Tooltip<'_>> {
        let ready = self.ready.as_ref()?;
        let category = ready.encoding.selection.category;
        let record = ready.dataset.records().get(row)?;
        Some(Tooltip {
            airport: &record.airport,
            category: ready.dataset.category_name(category)?,
            value: record.value(category)?,
        })
    }
}
