// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading airport delay tables into a [`Dataset`](delaymap_encoding::Dataset).
//!
//! The input is a CSV file with one row per airport: an id column, `lon`/`lat` in degrees and
//! one numeric column per delay category. Column names come from a [`LoaderConfig`], whose
//! defaults match the airport summary table:
//!
//! ```text
//! airport,lon,lat,Total Delays,Carrier,Weather,Late Arrival of the Same Aircraft at a Previous Airport
//! ATL,-84.43,33.64,14.2,3.9,0.6,5.1
//! ```

mod loader;

pub use loader::{DEFAULT_CATEGORIES, LoadError, LoaderConfig, load_dataset, read_dataset};
