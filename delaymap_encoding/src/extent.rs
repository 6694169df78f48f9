// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain resolution for a selected delay category.

use crate::dataset::{CategoryId, Dataset};
use crate::engine::EncodeError;

/// An observed `[min, max]` extent of a numeric attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

impl Extent {
    /// The zero-anchored domain `[0, max]` used for radii: zero delay reads as an invisible
    /// bubble, not the smallest observed delay.
    pub fn zero_anchored(&self) -> Self {
        Self {
            min: 0.0,
            max: self.max,
        }
    }

    /// Returns `true` when every observed value is the same.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Returns `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Resolves the observed extent of `category` across every record of `dataset`.
///
/// Non-finite values are a data defect and are reported, not skipped.
pub fn resolve_extent(dataset: &Dataset, category: CategoryId) -> Result<Extent, EncodeError> {
    if dataset.category_name(category).is_none() {
        return Err(EncodeError::UnknownCategory(category));
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in dataset.records() {
        let v = record
            .value(category)
            .ok_or(EncodeError::UnknownCategory(category))?;
        if !v.is_finite() {
            return Err(EncodeError::NonFiniteValue {
                airport: record.airport.clone(),
                category,
            });
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Ok(Extent { min, max })
    } else {
        Err(EncodeError::EmptyDataset)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::dataset::Record;

    fn dataset(values: &[f64]) -> Dataset {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new(alloc::format!("A{i}"), -90.0, 35.0, vec![*v]))
            .collect();
        Dataset::new(vec!["Total Delays".to_string()], records).unwrap()
    }

    #[test]
    fn resolves_min_and_max() {
        let e = resolve_extent(&dataset(&[12.0, 3.5, 40.25, 7.0]), CategoryId(0)).unwrap();
        assert_eq!(e, Extent { min: 3.5, max: 40.25 });
        assert_eq!(e.zero_anchored(), Extent { min: 0.0, max: 40.25 });
    }

    #[test]
    fn single_record_is_degenerate_not_an_error() {
        let e = resolve_extent(&dataset(&[9.0]), CategoryId(0)).unwrap();
        assert!(e.is_degenerate(), "one airport gives min == max");
        assert_eq!(e.span(), 0.0);
    }

    #[test]
    fn non_finite_values_are_reported() {
        let err = resolve_extent(&dataset(&[1.0, f64::NAN]), CategoryId(0)).unwrap_err();
        assert_eq!(
            err,
            EncodeError::NonFiniteValue {
                airport: "A1".to_string(),
                category: CategoryId(0),
            }
        );
    }

    #[test]
    fn unknown_category_is_reported() {
        let err = resolve_extent(&dataset(&[1.0]), CategoryId(4)).unwrap_err();
        assert_eq!(err, EncodeError::UnknownCategory(CategoryId(4)));
    }
}
