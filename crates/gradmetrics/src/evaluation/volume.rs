//! Network spread and hull volume of a gradient map.
//!
//! ## Purpose
//!
//! This module measures how spread out a gradient map is with respect to a
//! network of interest (a subset of its regions), or the volume its regions
//! occupy in feature space.
//!
//! ## Key concepts
//!
//! * **Distance**: Mean distance from *every* region to the centroid of the
//!   network's regions, i.e. how far the whole map sits from this network.
//! * **Hull**: Convex-hull volume of *all* regions. The network index set is
//!   accepted but not used in this mode.
//!
//! ## Invariants
//!
//! * Network indices lie in `[0, N)`; duplicates are weighted as given.
//! * Results are non-negative.

// External dependencies
use num_traits::Float;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// Internal dependencies
use crate::algorithms::hull::convex_hull_volume;
use crate::input::ClusterView;
use crate::math::distance::PointMethod;
use crate::math::stats::centroid;
use crate::primitives::errors::MetricsError;

// ============================================================================
// Volume Method
// ============================================================================

/// Strategy for measuring network volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VolumeMethod {
    /// Mean distance of all regions to the network centroid.
    #[default]
    Distance,
    /// Convex-hull volume of all regions.
    Hull,
}

impl FromStr for VolumeMethod {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "distance" => Ok(VolumeMethod::Distance),
            "hull" => Ok(VolumeMethod::Hull),
            _ => Err(MetricsError::invalid_argument(format!(
                "Unknown volume method: {}. Valid options: distance, hull",
                s
            ))),
        }
    }
}

impl fmt::Display for VolumeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeMethod::Distance => f.write_str("distance"),
            VolumeMethod::Hull => f.write_str("hull"),
        }
    }
}

// ============================================================================
// Network Volume
// ============================================================================

/// Point norm for [`network_volume`] when the caller does not pick one.
pub const DEFAULT_POINT_METHOD: PointMethod = PointMethod::L2;

/// Spread of `grad` (regions × features) relative to the network `network_idx`.
///
/// # Errors
///
/// * [`MetricsError::EmptyInput`] if `grad` has no rows, or (distance mode)
///   the index set is empty.
/// * [`MetricsError::InvalidArgument`] if an index is out of range.
/// * [`MetricsError::DegenerateGeometry`] if the hull cannot be built.
pub fn network_volume<T: Float>(
    grad: &ClusterView<'_, T>,
    network_idx: &[usize],
    method: VolumeMethod,
    pmethod: PointMethod,
) -> Result<T, MetricsError> {
    if grad.is_empty() {
        return Err(MetricsError::EmptyInput("gradient"));
    }

    match method {
        VolumeMethod::Distance => distance_spread(grad, network_idx, pmethod),
        VolumeMethod::Hull => {
            debug!(
                regions = grad.n_points(),
                network_size = network_idx.len(),
                "hull volume spans all regions; network indices unused"
            );
            convex_hull_volume(grad)
        }
    }
}

fn distance_spread<T: Float>(
    grad: &ClusterView<'_, T>,
    network_idx: &[usize],
    pmethod: PointMethod,
) -> Result<T, MetricsError> {
    if network_idx.is_empty() {
        return Err(MetricsError::EmptyInput("network index set"));
    }
    let n = grad.n_points();
    if let Some(&bad) = network_idx.iter().find(|&&i| i >= n) {
        return Err(MetricsError::invalid_argument(format!(
            "network index {} out of range for {} regions",
            bad, n
        )));
    }

    let center = centroid(network_idx.iter().map(|&i| grad.row(i)), grad.n_features())
        .ok_or(MetricsError::EmptyInput("network index set"))?;

    let total = grad
        .rows()
        .map(|row| pmethod.distance_unchecked(row, &center))
        .fold(T::zero(), |acc, d| acc + d);
    let count = T::from(n).ok_or_else(|| MetricsError::invalid_argument("region count overflow"))?;

    Ok(total / count)
}
