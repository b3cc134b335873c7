//! Descriptive statistics.
//!
//! ## Purpose
//!
//! This module provides the mean of a slice and the per-feature mean
//! (centroid) of a set of cluster rows.
//!
//! ## Invariants
//!
//! * Empty inputs yield `None`; no statistic is ever fabricated.
//! * Centroids have exactly one value per feature.

// External dependencies
use num_traits::Float;

/// Arithmetic mean of a slice.
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let n = T::from(values.len())?;
    Some(values.iter().fold(T::zero(), |acc, &v| acc + v) / n)
}

/// Per-feature mean of the given rows.
///
/// Every row must hold `n_features` values. Returns `None` for an empty row set.
pub fn centroid<'a, T, I>(rows: I, n_features: usize) -> Option<Vec<T>>
where
    T: Float + 'a,
    I: IntoIterator<Item = &'a [T]>,
{
    let mut sums = vec![T::zero(); n_features];
    let mut count = 0usize;
    for row in rows {
        for (s, &v) in sums.iter_mut().zip(row) {
            *s = *s + v;
        }
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let n = T::from(count)?;
    Some(sums.into_iter().map(|s| s / n).collect())
}
