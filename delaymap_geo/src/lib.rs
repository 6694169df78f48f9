// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geography for delaymap: the static base layer under the bubbles.
//!
//! - [`parse_boundaries`] reads a GeoJSON `FeatureCollection` of (multi)polygons.
//! - [`AlbersProjection`] maps lon/lat onto scene coordinates; [`AlbersUsa`] adds the Alaska
//!   and Hawaii insets. Both implement [`Projection`].
//! - [`BaseMapSpec`] turns projected boundaries into path marks.
//!
//! The encoding engine never touches this layer; it only shares the scene.

mod base_map;
mod geojson;
mod projection;

pub use base_map::BaseMapSpec;
pub use geojson::{Boundary, GeoError, load_boundaries, parse_boundaries};
pub use projection::{AlbersProjection, AlbersUsa, Projection};
