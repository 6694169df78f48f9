// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for generated marks.
//!
//! Marks carry an explicit `z_index` for render ordering. Within one z-index, a [`Scene`]
//! paints marks in the order they were last submitted, so per-row ordering (large bubbles first)
//! survives without minting one z-index per bubble.
//!
//! [`Scene`]: crate::Scene

/// Base-map boundary fills and strokes.
pub const BASE_MAP: i32 = -100;

/// Airport bubbles, drawn above the base map.
pub const BUBBLES: i32 = 20;

/// Legend symbols.
pub const LEGEND_SYMBOLS: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// Map titles and annotations.
pub const TITLES: i32 = 80;
