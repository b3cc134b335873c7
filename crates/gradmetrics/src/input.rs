//! Input abstractions for metric computation.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for the two input shapes the
//! crate works with: 1-D signals/points and 2-D clusters. Slices, vectors and
//! ndarray arrays all flow through the same two traits.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Inputs are viewed in place, never cloned.
//! * **Row-major clusters**: A cluster is a flat buffer of `n_points * n_features` values.
//! * **Fail-fast validation**: Non-contiguous ndarray inputs are rejected up front.
//!
//! ## Invariants
//!
//! * Every row of a [`ClusterView`] has exactly `n_features` values.
//! * `n_features` is never zero.
//!
//! ## Non-goals
//!
//! * This module does not copy or reshape non-contiguous data.
//! * This module does not validate finiteness of values.

// Feature-gated imports
#[cfg(feature = "cpu")]
use ndarray::{ArrayBase, Data, Ix1, Ix2};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::MetricsError;

// ============================================================================
// 1-D Inputs
// ============================================================================

/// Trait for types usable as a point or signal.
pub trait SignalInput<T: Float> {
    /// Convert the input to a contiguous slice.
    fn as_signal_slice(&self) -> Result<&[T], MetricsError>;
}

impl<T: Float> SignalInput<T> for [T] {
    fn as_signal_slice(&self) -> Result<&[T], MetricsError> {
        Ok(self)
    }
}

impl<T: Float> SignalInput<T> for Vec<T> {
    fn as_signal_slice(&self) -> Result<&[T], MetricsError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, const N: usize> SignalInput<T> for [T; N] {
    fn as_signal_slice(&self) -> Result<&[T], MetricsError> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "cpu")]
impl<T: Float, S> SignalInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_signal_slice(&self) -> Result<&[T], MetricsError> {
        self.as_slice().ok_or_else(|| {
            MetricsError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}

// ============================================================================
// 2-D Inputs
// ============================================================================

/// Borrowed row-major view of a cluster (N points × F features).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterView<'a, T> {
    data: &'a [T],
    n_features: usize,
}

impl<'a, T: Float> ClusterView<'a, T> {
    /// Wrap a flat row-major buffer holding points of `n_features` values each.
    pub fn new(data: &'a [T], n_features: usize) -> Result<Self, MetricsError> {
        if n_features == 0 {
            return Err(MetricsError::InvalidInput(
                "cluster feature count must be at least 1".to_string(),
            ));
        }
        if data.len() % n_features != 0 {
            return Err(MetricsError::InvalidInput(format!(
                "buffer of length {} is not a whole number of rows of {} features",
                data.len(),
                n_features
            )));
        }
        Ok(Self { data, n_features })
    }

    /// Number of points (rows).
    pub fn n_points(&self) -> usize {
        self.data.len() / self.n_features
    }

    /// Number of features per point (columns).
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Whether the cluster holds no points.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The `i`-th point.
    pub fn row(&self, i: usize) -> &'a [T] {
        &self.data[i * self.n_features..(i + 1) * self.n_features]
    }

    /// Iterate over all points in order.
    pub fn rows(&self) -> std::slice::ChunksExact<'a, T> {
        self.data.chunks_exact(self.n_features)
    }

    /// The underlying flat buffer.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }
}

/// Trait for types usable as a cluster.
pub trait ClusterInput<T: Float> {
    /// View the input as a row-major cluster.
    fn as_cluster(&self) -> Result<ClusterView<'_, T>, MetricsError>;
}

impl<T: Float> ClusterInput<T> for ClusterView<'_, T> {
    fn as_cluster(&self) -> Result<ClusterView<'_, T>, MetricsError> {
        Ok(*self)
    }
}

#[cfg(feature = "cpu")]
impl<T: Float, S> ClusterInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_cluster(&self) -> Result<ClusterView<'_, T>, MetricsError> {
        let slice = self.as_slice().ok_or_else(|| {
            MetricsError::InvalidInput(
                "ndarray cluster must be contiguous in standard (row-major) layout".to_string(),
            )
        })?;
        ClusterView::new(slice, self.ncols())
    }
}
