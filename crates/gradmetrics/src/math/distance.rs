//! Point-to-point distances.
//!
//! ## Purpose
//!
//! This module computes the distance between two points of equal length
//! under one of three norms. It is the leaf every cluster and volume metric
//! delegates to.
//!
//! ## Key concepts
//!
//! * **L0**: Maximum absolute coordinate difference (Chebyshev).
//! * **L1**: Sum of absolute coordinate differences (Manhattan).
//! * **L2**: Euclidean norm of the difference vector.
//!
//! ## Invariants
//!
//! * Results are non-negative and symmetric in their arguments.
//! * `L0 <= L2 <= L1` for any pair of points.
//! * Points of different length are rejected, never broadcast.

// External dependencies
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

// Internal dependencies
use crate::primitives::errors::MetricsError;

// ============================================================================
// Point Method
// ============================================================================

/// Norm used to compare two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointMethod {
    /// Chebyshev distance.
    L0,
    /// Manhattan distance.
    #[default]
    L1,
    /// Euclidean distance.
    L2,
}

impl FromStr for PointMethod {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l0" => Ok(PointMethod::L0),
            "l1" => Ok(PointMethod::L1),
            "l2" => Ok(PointMethod::L2),
            _ => Err(MetricsError::invalid_argument(format!(
                "Unknown point method: {}. Valid options: L0, L1, L2",
                s
            ))),
        }
    }
}

impl fmt::Display for PointMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PointMethod::L0 => "L0",
            PointMethod::L1 => "L1",
            PointMethod::L2 => "L2",
        };
        f.write_str(name)
    }
}

impl PointMethod {
    /// Distance between two points already known to have equal length.
    #[inline]
    pub fn distance_unchecked<T: Float>(self, a: &[T], b: &[T]) -> T {
        let diffs = a.iter().zip(b).map(|(&x, &y)| (x - y).abs());
        match self {
            PointMethod::L0 => diffs.fold(T::zero(), T::max),
            PointMethod::L1 => diffs.fold(T::zero(), |acc, d| acc + d),
            PointMethod::L2 => diffs.fold(T::zero(), |acc, d| acc + d * d).sqrt(),
        }
    }
}

// ============================================================================
// Point Distance
// ============================================================================

/// Distance between two points of identical length.
pub fn points_distance<T: Float>(a: &[T], b: &[T], method: PointMethod) -> Result<T, MetricsError> {
    if a.len() != b.len() {
        return Err(MetricsError::shape_mismatch("points_distance", a.len(), b.len()));
    }
    Ok(method.distance_unchecked(a, b))
}
