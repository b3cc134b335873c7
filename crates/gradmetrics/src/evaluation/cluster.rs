//! Distances between clusters of points.
//!
//! ## Purpose
//!
//! This module compares two point sets that share a feature count but may
//! differ in size, either through their closest pair of points or through
//! their centroids.
//!
//! ## Design notes
//!
//! * **Delegation**: Every point comparison goes through [`PointMethod`].
//! * **Parallelism**: The closest-pair scan runs over rows of the first
//!   cluster with `rayon` once the cross product is large enough.
//!
//! ## Invariants
//!
//! * Both clusters are non-empty and share their feature count.
//! * `cluster_distance(A, A, Closest, _)` is zero.
//!
//! ## Non-goals
//!
//! * This module does not build spatial indices; the scan is O(|A|·|B|).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

// Internal dependencies
use crate::input::ClusterView;
use crate::math::distance::PointMethod;
use crate::math::stats::centroid;
use crate::primitives::errors::MetricsError;

/// Cross-product size above which the closest-pair scan goes parallel.
#[cfg(feature = "cpu")]
const PARALLEL_PAIR_THRESHOLD: usize = 16_384;

// ============================================================================
// Cluster Method
// ============================================================================

/// Strategy for comparing two clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClusterMethod {
    /// Minimum distance over all cross-cluster point pairs.
    #[default]
    Closest,
    /// Distance between the per-feature means.
    Centroid,
}

impl FromStr for ClusterMethod {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "closest" => Ok(ClusterMethod::Closest),
            "centroid" => Ok(ClusterMethod::Centroid),
            _ => Err(MetricsError::invalid_argument(format!(
                "Unknown cluster method: {}. Valid options: closest, centroid",
                s
            ))),
        }
    }
}

impl fmt::Display for ClusterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterMethod::Closest => f.write_str("closest"),
            ClusterMethod::Centroid => f.write_str("centroid"),
        }
    }
}

// ============================================================================
// Cluster Distance
// ============================================================================

/// Distance between two clusters.
///
/// # Errors
///
/// * [`MetricsError::EmptyInput`] if either cluster has no points.
/// * [`MetricsError::ShapeMismatch`] if the feature counts differ.
pub fn cluster_distance<T>(
    a: &ClusterView<'_, T>,
    b: &ClusterView<'_, T>,
    method: ClusterMethod,
    pmethod: PointMethod,
) -> Result<T, MetricsError>
where
    T: Float + Send + Sync,
{
    if a.is_empty() || b.is_empty() {
        return Err(MetricsError::EmptyInput("cluster"));
    }
    if a.n_features() != b.n_features() {
        return Err(MetricsError::shape_mismatch(
            "cluster_distance",
            a.n_features(),
            b.n_features(),
        ));
    }

    match method {
        ClusterMethod::Closest => Ok(closest_pass(a, b, pmethod)),
        ClusterMethod::Centroid => {
            let ca = centroid(a.rows(), a.n_features()).ok_or(MetricsError::EmptyInput("cluster"))?;
            let cb = centroid(b.rows(), b.n_features()).ok_or(MetricsError::EmptyInput("cluster"))?;
            Ok(pmethod.distance_unchecked(&ca, &cb))
        }
    }
}

fn closest_from<T: Float>(row: &[T], b: &ClusterView<'_, T>, pmethod: PointMethod) -> T {
    b.rows()
        .map(|other| pmethod.distance_unchecked(row, other))
        .fold(T::infinity(), T::min)
}

#[cfg(feature = "cpu")]
fn closest_pass<T>(a: &ClusterView<'_, T>, b: &ClusterView<'_, T>, pmethod: PointMethod) -> T
where
    T: Float + Send + Sync,
{
    if a.n_points() * b.n_points() > PARALLEL_PAIR_THRESHOLD {
        a.as_slice()
            .par_chunks_exact(a.n_features())
            .map(|row| closest_from(row, b, pmethod))
            .reduce(T::infinity, T::min)
    } else {
        a.rows()
            .map(|row| closest_from(row, b, pmethod))
            .fold(T::infinity(), T::min)
    }
}

// Sequential fallback
#[cfg(not(feature = "cpu"))]
fn closest_pass<T>(a: &ClusterView<'_, T>, b: &ClusterView<'_, T>, pmethod: PointMethod) -> T
where
    T: Float + Send + Sync,
{
    a.rows()
        .map(|row| closest_from(row, b, pmethod))
        .fold(T::infinity(), T::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_closest_and_centroid() {
        let a = [0.0, 0.0, 1.0, 0.0];
        let b = [4.0, 0.0, 6.0, 0.0];
        let va = ClusterView::new(&a, 2).unwrap();
        let vb = ClusterView::new(&b, 2).unwrap();

        let closest = cluster_distance(&va, &vb, ClusterMethod::Closest, PointMethod::L1).unwrap();
        assert_abs_diff_eq!(closest, 3.0);

        let cent = cluster_distance(&va, &vb, ClusterMethod::Centroid, PointMethod::L2).unwrap();
        assert_abs_diff_eq!(cent, 4.5);
    }

    #[test]
    fn test_self_distance_is_zero() {
        let a = [0.3, 1.2, -4.0, 2.2, 5.5, 0.1];
        let va = ClusterView::new(&a, 3).unwrap();
        for pmethod in [PointMethod::L0, PointMethod::L1, PointMethod::L2] {
            assert_eq!(
                cluster_distance(&va, &va, ClusterMethod::Closest, pmethod).unwrap(),
                0.0
            );
        }
    }

    #[test]
    fn test_different_sizes_same_features() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0, 6.0, 8.0, 9.0, 12.0];
        let va = ClusterView::new(&a, 2).unwrap();
        let vb = ClusterView::new(&b, 2).unwrap();
        let d = cluster_distance(&va, &vb, ClusterMethod::Closest, PointMethod::L2).unwrap();
        assert_abs_diff_eq!(d, 5.0);
        let d = cluster_distance(&va, &vb, ClusterMethod::Centroid, PointMethod::L2).unwrap();
        assert_abs_diff_eq!(d, 10.0);
    }

    #[test]
    fn test_errors() {
        let a = [0.0, 0.0];
        let b = [0.0, 0.0, 0.0];
        let va = ClusterView::new(&a, 2).unwrap();
        let vb = ClusterView::new(&b, 3).unwrap();
        assert!(matches!(
            cluster_distance(&va, &vb, ClusterMethod::Closest, PointMethod::L1),
            Err(MetricsError::ShapeMismatch { .. })
        ));

        let empty: [f64; 0] = [];
        let ve = ClusterView::new(&empty, 2).unwrap();
        assert_eq!(
            cluster_distance(&va, &ve, ClusterMethod::Centroid, PointMethod::L1),
            Err(MetricsError::EmptyInput("cluster"))
        );

        assert!("ward".parse::<ClusterMethod>().is_err());
        assert!("single".parse::<ClusterMethod>().is_err());
        assert!("mean".parse::<ClusterMethod>().is_err());
        assert_eq!("Closest".parse::<ClusterMethod>().unwrap(), ClusterMethod::Closest);
        assert_eq!(ClusterMethod::default(), ClusterMethod::Closest);
    }
}
