// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Airport delay records and the immutable dataset they live in.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

/// Index of a delay category within a [`Dataset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(pub usize);

/// One airport's summary statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Airport code (unique within a dataset).
    pub airport: String,
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Mean delay in minutes per flight, one entry per dataset category.
    pub values: Vec<f64>,
}

impl Record {
    /// Creates a record.
    pub fn new(airport: impl Into<String>, lon: f64, lat: f64, values: Vec<f64>) -> Self {
        Self {
            airport: airport.into(),
            lon,
            lat,
            values,
        }
    }

    /// Returns the value for `category`, if present.
    pub fn value(&self, category: CategoryId) -> Option<f64> {
        self.values.get(category.0).copied()
    }
}

/// Errors returned when building a [`Dataset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetError {
    /// No records were supplied.
    Empty,
    /// No categories were supplied.
    NoCategories,
    /// A category name appears more than once.
    DuplicateCategory(String),
    /// An airport id appears more than once.
    DuplicateAirport(String),
    /// A record does not carry exactly one value per category.
    ValueCount {
        /// The offending airport.
        airport: String,
        /// Number of categories in the dataset.
        expected: usize,
        /// Number of values on the record.
        actual: usize,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("dataset has no records"),
            Self::NoCategories => f.write_str("dataset has no delay categories"),
            Self::DuplicateCategory(name) => write!(f, "duplicate category `{name}`"),
            Self::DuplicateAirport(id) => write!(f, "duplicate airport `{id}`"),
            Self::ValueCount {
                airport,
                expected,
                actual,
            } => write!(
                f,
                "airport `{airport}` has {actual} values, expected {expected}"
            ),
        }
    }
}

impl core::error::Error for DatasetError {}

/// An ordered, immutable set of airport records sharing one list of delay categories.
///
/// The encoding engine borrows a dataset for every recompute; it is never copied.
#[derive(Clone, Debug)]
pub struct Dataset {
    categories: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset, validating shape and identity.
    pub fn new(categories: Vec<String>, records: Vec<Record>) -> Result<Self, DatasetError> {
        if categories.is_empty() {
            return Err(DatasetError::NoCategories);
        }
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        validate(&categories, &records)?;
        Ok(Self {
            categories,
            records,
        })
    }

    /// Category names, in column order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Looks up a category by its exact name.
    pub fn category_id(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .position(|c| c == name)
            .map(CategoryId)
    }

    /// Returns the name of `category`, if it exists.
    pub fn category_name(&self, category: CategoryId) -> Option<&str> {
        self.categories.get(category.0).map(String::as_str)
    }

    /// Records, in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records (always at least one).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: a dataset holds at least one record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the values of `category` in record order.
    pub fn values(&self, category: CategoryId) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(move |r| r.value(category))
    }
}

/// Checks names and record shape; the sets borrow from the inputs and are dropped on return.
fn validate(categories: &[String], records: &[Record]) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for name in categories {
        if !seen.insert(name.as_str()) {
            return Err(DatasetError::DuplicateCategory(name.clone()));
        }
    }

    let mut airports = HashSet::new();
    for record in records {
        if record.values.len() != categories.len() {
            return Err(DatasetError::ValueCount {
                airport: record.airport.clone(),
                expected: categories.len(),
                actual: record.values.len(),
            });
        }
        if !airports.insert(record.airport.as_str()) {
            return Err(DatasetError::DuplicateAirport(record.airport.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn cats() -> Vec<String> {
        vec!["Total Delays".to_string(), "Weather".to_string()]
    }

    #[test]
    fn builds_and_looks_up_categories() {
        let ds = Dataset::new(
            cats(),
            vec![
                Record::new("AAA", -80.0, 30.0, vec![10.0, 1.0]),
                Record::new("BBB", -90.0, 40.0, vec![20.0, 2.0]),
            ],
        )
        .unwrap();
        let weather = ds.category_id("Weather").unwrap();
        assert_eq!(weather, CategoryId(1));
        assert_eq!(ds.category_name(weather), Some("Weather"));
        assert_eq!(ds.values(weather).collect::<Vec<_>>(), vec![1.0, 2.0]);
        assert_eq!(ds.category_id("weather"), None, "lookup is exact");
    }

    #[test]
    fn rejects_empty_and_misshapen_input() {
        assert_eq!(Dataset::new(cats(), vec![]).unwrap_err(), DatasetError::Empty);
        assert_eq!(
            Dataset::new(vec![], vec![Record::new("AAA", 0.0, 0.0, vec![])]).unwrap_err(),
            DatasetError::NoCategories
        );
        let err = Dataset::new(cats(), vec![Record::new("AAA", 0.0, 0.0, vec![1.0])]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::ValueCount {
                airport: "AAA".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn rejects_duplicate_identity() {
        let err = Dataset::new(
            cats(),
            vec![
                Record::new("AAA", 0.0, 0.0, vec![1.0, 1.0]),
                Record::new("AAA", 1.0, 1.0, vec![2.0, 2.0]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, DatasetError::DuplicateAirport("AAA".to_string()));

        let err = Dataset::new(
            vec!["A".to_string(), "A".to_string()],
            vec![Record::new("AAA", 0.0, 0.0, vec![1.0, 1.0])],
        )
        .unwrap_err();
        assert_eq!(err, DatasetError::DuplicateCategory("A".to_string()));
    }
}
