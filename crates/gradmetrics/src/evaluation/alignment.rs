//! Alignment error between a reference map and an aligned candidate.
//!
//! ## Purpose
//!
//! After a candidate gradient map has been aligned (e.g. by Procrustes
//! rotation) onto a reference, this module scores the residual disagreement
//! as the summed squared difference per region.
//!
//! ## Invariants
//!
//! * The divisor is the region count N, not N·F.
//! * The score is zero for identical maps and symmetric in its arguments.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::input::ClusterView;
use crate::primitives::errors::MetricsError;

/// Sum of squared differences between `reference` and `aligned`, divided by
/// the number of regions.
pub fn procrustes_score<T: Float>(
    reference: &ClusterView<'_, T>,
    aligned: &ClusterView<'_, T>,
) -> Result<T, MetricsError> {
    if reference.n_features() != aligned.n_features() {
        return Err(MetricsError::shape_mismatch(
            "procrustes_score features",
            reference.n_features(),
            aligned.n_features(),
        ));
    }
    if reference.n_points() != aligned.n_points() {
        return Err(MetricsError::shape_mismatch(
            "procrustes_score regions",
            reference.n_points(),
            aligned.n_points(),
        ));
    }
    if reference.is_empty() {
        return Err(MetricsError::EmptyInput("reference gradient"));
    }

    let error = reference
        .as_slice()
        .iter()
        .zip(aligned.as_slice())
        .fold(T::zero(), |acc, (&r, &a)| acc + (r - a) * (r - a));
    let regions = T::from(reference.n_points())
        .ok_or_else(|| MetricsError::invalid_argument("region count overflow"))?;

    Ok(error / regions)
}
