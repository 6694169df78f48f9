// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use delaymap_encoding::{Dataset, DatasetError, Record};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Delay categories of the airport summary table, in display order.
pub const DEFAULT_CATEGORIES: [&str; 4] = [
    "Total Delays",
    "Carrier",
    "Weather",
    "Late Arrival of the Same Aircraft at a Previous Airport",
];

/// Column names used to read a delay table.
///
/// Deserializable so a column mapping can be kept next to the data file; missing fields take
/// the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Airport id column.
    pub id_column: String,
    /// Longitude column (degrees).
    pub lon_column: String,
    /// Latitude column (degrees).
    pub lat_column: String,
    /// Delay category columns; each becomes one selectable category.
    pub categories: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            id_column: "airport".to_string(),
            lon_column: "lon".to_string(),
            lat_column: "lat".to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl LoaderConfig {
    /// Replaces the category columns.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

/// Errors returned while loading a delay table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The CSV stream is malformed.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A configured column is absent from the header.
    #[error("missing column `{0}`")]
    MissingColumn(String),
    /// A numeric field does not parse.
    #[error("row {row}: column `{column}` is not a number: `{value}`")]
    InvalidNumber {
        /// 1-based data row (the header is row 0).
        row: usize,
        /// Column name.
        column: String,
        /// The raw field.
        value: String,
    },
    /// A field parses but is out of range: a non-finite coordinate, or a delay that is negative
    /// or not finite.
    #[error("row {row}: column `{column}` is out of range: `{value}`")]
    InvalidValue {
        /// 1-based data row (the header is row 0).
        row: usize,
        /// Column name.
        column: String,
        /// The raw field.
        value: String,
    },
    /// The rows do not form a valid dataset.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Reads a delay table from a CSV file.
pub fn load_dataset(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = read_dataset(BufReader::new(file), config)?;
    info!(
        path = %path.display(),
        airports = dataset.len(),
        categories = dataset.categories().len(),
        "loaded delay table"
    );
    Ok(dataset)
}

/// Reads a delay table from any CSV source.
///
/// Columns not named by `config` are ignored.
pub fn read_dataset(reader: impl Read, config: &LoaderConfig) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let index_of = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let id_col = index_of(&config.id_column)?;
    let lon_col = index_of(&config.lon_column)?;
    let lat_col = index_of(&config.lat_column)?;
    let category_cols = config
        .categories
        .iter()
        .map(|name| index_of(name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let line = i + 1;
        let number = |col: usize, in_range: fn(f64) -> bool| -> Result<f64, LoadError> {
            let raw = row.get(col).unwrap_or("");
            let column = || headers.get(col).unwrap_or("").to_string();
            let v = raw.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
                row: line,
                column: column(),
                value: raw.to_string(),
            })?;
            if !in_range(v) {
                return Err(LoadError::InvalidValue {
                    row: line,
                    column: column(),
                    value: raw.to_string(),
                });
            }
            Ok(v)
        };
        let airport = row.get(id_col).unwrap_or("").to_string();
        let lon = number(lon_col, f64::is_finite)?;
        let lat = number(lat_col, f64::is_finite)?;
        let values = category_cols
            .iter()
            .map(|&col| number(col, |v| v.is_finite() && v >= 0.0))
            .collect::<Result<Vec<_>, _>>()?;
        records.push(Record::new(airport, lon, lat, values));
    }

    Ok(Dataset::new(config.categories.clone(), records)?)
}
