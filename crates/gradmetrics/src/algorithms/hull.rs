//! Incremental convex hull in arbitrary dimension.
//!
//! ## Purpose
//!
//! This module builds the convex hull of a cluster of `N` points in `F`
//! dimensions and measures the volume it encloses. The hull is used as a
//! spread measure for gradient maps.
//!
//! ## Design notes
//!
//! * **Beneath-beyond**: Starts from a maximal simplex, then inserts points
//!   one at a time, replacing the facets they can see with a cone to the
//!   horizon.
//! * **Deterministic**: Horizon ridges are kept in a `BTreeMap`, so facet
//!   order (and therefore float summation order) never varies between runs.
//! * **Volume**: Sum of the simplices spanned by each facet and an interior
//!   point of the initial simplex.
//!
//! ## Key concepts
//!
//! * **Facet**: `F` vertex indices with a unit outward normal and plane offset.
//! * **Ridge**: `F - 1` vertex indices shared by two adjacent facets.
//! * **Horizon**: Ridges between a visible and a non-visible facet.
//!
//! ## Invariants
//!
//! * Every facet normal points away from the interior point.
//! * The interior point stays strictly inside the hull throughout construction.
//! * The volume is non-negative.
//!
//! ## Non-goals
//!
//! * This module does not support hulls of fewer than 2 dimensions.
//! * This module does not triangulate coplanar facets into a minimal form.

// External dependencies
use num_traits::Float;
use std::collections::BTreeMap;
use tracing::trace;

// Internal dependencies
use crate::input::ClusterView;
use crate::math::linalg::{determinant, dot, generalized_cross};
use crate::math::stats::centroid;
use crate::primitives::errors::MetricsError;

/// Relative tolerance for visibility and rank decisions.
const RELATIVE_TOLERANCE: f64 = 1e-10;

// ============================================================================
// Facet
// ============================================================================

#[derive(Debug, Clone)]
struct Facet<T> {
    vertices: Vec<usize>,
    normal: Vec<T>,
    offset: T,
}

impl<T: Float> Facet<T> {
    /// Facet through `vertices`, oriented away from `interior`.
    ///
    /// Returns `None` when the vertices do not span a hyperplane.
    fn through(cluster: &ClusterView<'_, T>, vertices: Vec<usize>, interior: &[T]) -> Option<Self> {
        let d = cluster.n_features();
        let base = cluster.row(vertices[0]);
        let edges: Vec<Vec<T>> = vertices[1..]
            .iter()
            .map(|&v| cluster.row(v).iter().zip(base).map(|(&a, &b)| a - b).collect())
            .collect();

        let mut normal = generalized_cross(&edges, d);
        let norm = dot(&normal, &normal).sqrt();
        if !(norm > T::zero()) || !norm.is_finite() {
            return None;
        }
        normal.iter_mut().for_each(|c| *c = *c / norm);

        let mut offset = dot(&normal, base);
        if dot(&normal, interior) - offset > T::zero() {
            normal.iter_mut().for_each(|c| *c = -*c);
            offset = -offset;
        }

        Some(Self {
            vertices,
            normal,
            offset,
        })
    }

    #[inline]
    fn signed_distance(&self, point: &[T]) -> T {
        dot(&self.normal, point) - self.offset
    }
}

// ============================================================================
// Convex Hull
// ============================================================================

/// Convex hull of a point cloud.
#[derive(Debug, Clone)]
pub struct ConvexHull<T> {
    facets: Vec<Facet<T>>,
    volume: T,
}

impl<T: Float> ConvexHull<T> {
    /// Build the hull of every row of `cluster`.
    ///
    /// # Errors
    ///
    /// * [`MetricsError::EmptyInput`] if the cluster has no rows.
    /// * [`MetricsError::DegenerateGeometry`] if there are fewer than 2
    ///   features, fewer than `F + 1` points, or the points do not span all
    ///   `F` dimensions.
    pub fn new(cluster: &ClusterView<'_, T>) -> Result<Self, MetricsError> {
        let d = cluster.n_features();
        let n = cluster.n_points();

        if n == 0 {
            return Err(MetricsError::EmptyInput("convex hull point set"));
        }
        if d < 2 {
            return Err(MetricsError::degenerate(format!(
                "convex hull requires at least 2 features, got {}",
                d
            )));
        }
        if n < d + 1 {
            return Err(MetricsError::degenerate(format!(
                "convex hull in {} dimensions requires at least {} points, got {}",
                d,
                d + 1,
                n
            )));
        }

        let tol = tolerance(cluster)?;
        let simplex = initial_simplex(cluster, tol)?;
        let interior = centroid(simplex.iter().map(|&i| cluster.row(i)), d)
            .ok_or(MetricsError::EmptyInput("convex hull point set"))?;

        let mut facets = Vec::with_capacity(2 * (d + 1));
        for skip in 0..simplex.len() {
            let vertices: Vec<usize> = simplex
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != skip)
                .map(|(_, &v)| v)
                .collect();
            let facet = Facet::through(cluster, vertices, &interior).ok_or_else(|| {
                MetricsError::degenerate("initial simplex has a degenerate facet")
            })?;
            facets.push(facet);
        }

        let mut in_simplex = vec![false; n];
        simplex.iter().for_each(|&i| in_simplex[i] = true);

        for (p, point) in cluster.rows().enumerate() {
            if in_simplex[p] {
                continue;
            }

            let visible: Vec<bool> = facets
                .iter()
                .map(|f| f.signed_distance(point) > tol)
                .collect();
            if !visible.iter().any(|&v| v) {
                continue;
            }

            // Ridges seen once among visible facets form the horizon
            let mut ridges: BTreeMap<Vec<usize>, usize> = BTreeMap::new();
            for facet in facets.iter().zip(&visible).filter(|(_, &v)| v).map(|(f, _)| f) {
                for k in 0..d {
                    let mut ridge = facet.vertices.clone();
                    ridge.remove(k);
                    ridge.sort_unstable();
                    *ridges.entry(ridge).or_insert(0) += 1;
                }
            }

            let mut next: Vec<Facet<T>> = facets
                .into_iter()
                .zip(&visible)
                .filter(|(_, &v)| !v)
                .map(|(f, _)| f)
                .collect();
            for (mut ridge, count) in ridges {
                if count != 1 {
                    continue;
                }
                ridge.push(p);
                if let Some(facet) = Facet::through(cluster, ridge, &interior) {
                    next.push(facet);
                }
            }
            facets = next;
        }

        let volume = hull_volume(cluster, &facets, &interior)?;
        trace!(points = n, dims = d, facets = facets.len(), "convex hull built");

        Ok(Self { facets, volume })
    }

    /// Enclosed volume (area in 2-D).
    pub fn volume(&self) -> T {
        self.volume
    }

    /// Number of simplicial facets.
    pub fn n_facets(&self) -> usize {
        self.facets.len()
    }

    /// Sorted indices of the points lying on the hull boundary.
    pub fn vertex_indices(&self) -> Vec<usize> {
        let mut vertices: Vec<usize> = self
            .facets
            .iter()
            .flat_map(|f| f.vertices.iter().copied())
            .collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }
}

/// Convex hull volume of every row of `cluster`.
pub fn convex_hull_volume<T: Float>(cluster: &ClusterView<'_, T>) -> Result<T, MetricsError> {
    ConvexHull::new(cluster).map(|hull| hull.volume())
}

// ============================================================================
// Construction Helpers
// ============================================================================

fn tolerance<T: Float>(cluster: &ClusterView<'_, T>) -> Result<T, MetricsError> {
    let d = cluster.n_features();
    let mut extent = T::zero();
    for k in 0..d {
        let (lo, hi) = cluster
            .rows()
            .map(|row| row[k])
            .fold((T::infinity(), T::neg_infinity()), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        extent = extent.max(hi - lo);
    }

    if !(extent > T::zero()) || !extent.is_finite() {
        return Err(MetricsError::degenerate(
            "points are coincident or non-finite",
        ));
    }
    Ok(extent * T::from(RELATIVE_TOLERANCE).unwrap_or_else(T::epsilon))
}

/// Pick `F + 1` affinely independent points by greedy Gram-Schmidt.
fn initial_simplex<T: Float>(
    cluster: &ClusterView<'_, T>,
    tol: T,
) -> Result<Vec<usize>, MetricsError> {
    let d = cluster.n_features();

    let origin_idx = cluster
        .rows()
        .enumerate()
        .fold((0, T::infinity()), |(best, lo), (i, row)| {
            if row[0] < lo {
                (i, row[0])
            } else {
                (best, lo)
            }
        })
        .0;
    let origin = cluster.row(origin_idx);

    let mut basis: Vec<Vec<T>> = Vec::with_capacity(d);
    let mut chosen = vec![origin_idx];

    for _ in 0..d {
        let mut best: Option<(usize, Vec<T>, T)> = None;
        for (i, row) in cluster.rows().enumerate() {
            let mut residual: Vec<T> = row.iter().zip(origin).map(|(&a, &b)| a - b).collect();
            for b in &basis {
                let proj = dot(&residual, b);
                residual
                    .iter_mut()
                    .zip(b)
                    .for_each(|(r, &bk)| *r = *r - proj * bk);
            }
            let norm = dot(&residual, &residual).sqrt();
            if best.as_ref().map_or(true, |(_, _, best_norm)| norm > *best_norm) {
                best = Some((i, residual, norm));
            }
        }

        match best {
            Some((i, residual, norm)) if norm > tol => {
                basis.push(residual.into_iter().map(|r| r / norm).collect());
                chosen.push(i);
            }
            _ => {
                return Err(MetricsError::degenerate(format!(
                    "points span fewer than {} dimensions",
                    d
                )));
            }
        }
    }

    Ok(chosen)
}

fn hull_volume<T: Float>(
    cluster: &ClusterView<'_, T>,
    facets: &[Facet<T>],
    interior: &[T],
) -> Result<T, MetricsError> {
    let d = cluster.n_features();
    let factorial = (1..=d).fold(1.0_f64, |acc, k| acc * k as f64);
    let factorial = T::from(factorial)
        .ok_or_else(|| MetricsError::invalid_argument("feature count too large for hull volume"))?;

    let mut total = T::zero();
    for facet in facets {
        let mut m = Vec::with_capacity(d * d);
        for &v in &facet.vertices {
            m.extend(cluster.row(v).iter().zip(interior).map(|(&a, &c)| a - c));
        }
        total = total + determinant(m, d).abs();
    }
    Ok(total / factorial)
}
