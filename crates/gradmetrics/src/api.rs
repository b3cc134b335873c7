//! High-level API for gradient alignment metrics.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points. Plain metrics
//! (point, cluster, volume and alignment scores) are exposed as functions
//! over any supported input type. The correlation search is configured with
//! a fluent builder that either builds a single-pair searcher or converts to
//! a batch adapter.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Marker types transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`CorrelationSearchBuilder`] via `CorrelationSearch::new()`.
//! 2. Chain configuration methods (`.tolshift()`, `.find()`, etc.).
//! 3. Call `.build()` for one pair, or `.adapter(Adapter::Batch)` for many.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchCorrelationSearchBuilder;
use crate::engine::executor::{SearchConfig, SearchExecutor};
use crate::evaluation::{alignment, cluster, volume};
use crate::input::{ClusterInput, SignalInput};
use crate::math::distance;

// Publicly re-exported types
pub use crate::algorithms::correlation::{pearsonr, PearsonResult};
pub use crate::algorithms::hull::ConvexHull;
pub use crate::engine::executor::{CorrelationResult, ShiftOffset, ShiftScores};
pub use crate::evaluation::cluster::ClusterMethod;
pub use crate::evaluation::volume::VolumeMethod;
pub use crate::input::ClusterView;
pub use crate::math::distance::PointMethod;
pub use crate::primitives::errors::MetricsError;

// ============================================================================
// Metric Functions
// ============================================================================

/// Distance between two points of identical length.
pub fn points_distance<T, I1, I2>(a: &I1, b: &I2, pmethod: PointMethod) -> Result<T, MetricsError>
where
    T: Float,
    I1: SignalInput<T> + ?Sized,
    I2: SignalInput<T> + ?Sized,
{
    distance::points_distance(a.as_signal_slice()?, b.as_signal_slice()?, pmethod)
}

/// Distance between two clusters sharing a feature count.
pub fn cluster_distance<T, C1, C2>(
    a: &C1,
    b: &C2,
    method: ClusterMethod,
    pmethod: PointMethod,
) -> Result<T, MetricsError>
where
    T: Float + Send + Sync,
    C1: ClusterInput<T> + ?Sized,
    C2: ClusterInput<T> + ?Sized,
{
    cluster::cluster_distance(&a.as_cluster()?, &b.as_cluster()?, method, pmethod)
}

/// Spread of a gradient map around a network, or its hull volume.
pub fn network_volume<T, C>(
    grad: &C,
    network_idx: &[usize],
    method: VolumeMethod,
    pmethod: PointMethod,
) -> Result<T, MetricsError>
where
    T: Float,
    C: ClusterInput<T> + ?Sized,
{
    volume::network_volume(&grad.as_cluster()?, network_idx, method, pmethod)
}

/// Squared alignment error per region.
pub fn procrustes_score<T, C1, C2>(reference: &C1, aligned: &C2) -> Result<T, MetricsError>
where
    T: Float,
    C1: ClusterInput<T> + ?Sized,
    C2: ClusterInput<T> + ?Sized,
{
    alignment::procrustes_score(&reference.as_cluster()?, &aligned.as_cluster()?)
}

/// Lag-tolerant correlation search with default options.
///
/// Shorthand for `CorrelationSearch::new().tolshift(tolshift).find(find)`.
pub fn correlation_search<T, I1, I2>(
    a: &I1,
    b: &I2,
    tolshift: usize,
    find: bool,
) -> Result<CorrelationResult<T>, MetricsError>
where
    T: Float + Send + Sync,
    I1: SignalInput<T> + ?Sized,
    I2: SignalInput<T> + ?Sized,
{
    CorrelationSearch::new()
        .tolshift(tolshift)
        .find(find)
        .build()?
        .fit(a, b)
}

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

/// Conversion from the base builder into an adapter-specific builder.
pub trait SearchAdapter {
    /// Builder produced by the conversion.
    type Output;

    /// Convert the base builder.
    fn convert(builder: CorrelationSearchBuilder) -> Self::Output;
}

/// Marker for parallel batch search over many signal pairs.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl SearchAdapter for Batch {
    type Output = BatchCorrelationSearchBuilder;

    fn convert(builder: CorrelationSearchBuilder) -> Self::Output {
        // Batch defaults to parallel unless the user opted out
        let parallel = builder.parallel.unwrap_or(true);
        BatchCorrelationSearchBuilder::new(builder.config).parallel(parallel)
    }
}

// ============================================================================
// Correlation Search Builder
// ============================================================================

/// Entry point for configuring a correlation search.
pub struct CorrelationSearch;

impl CorrelationSearch {
    /// Create a builder with default parameters.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> CorrelationSearchBuilder {
        CorrelationSearchBuilder::default()
    }
}

/// Fluent builder for the lag-tolerant correlation search.
#[derive(Debug, Clone, Default)]
pub struct CorrelationSearchBuilder {
    config: SearchConfig,
    parallel: Option<bool>,
}

impl CorrelationSearchBuilder {
    /// Set the exclusive maximum shift (must be at least 1).
    pub fn tolshift(mut self, tolshift: usize) -> Self {
        self.config.tolshift = tolshift;
        self
    }

    /// Enable reporting the winning offset and its p-value.
    pub fn find(mut self, enabled: bool) -> Self {
        self.config.find = enabled;
        self
    }

    /// Enable returning the candidate score sequences.
    pub fn return_scores(mut self, enabled: bool) -> Self {
        self.config.return_scores = enabled;
        self
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Convert into an adapter-specific builder.
    pub fn adapter<A: SearchAdapter>(self, _adapter: A) -> A::Output {
        A::convert(self)
    }

    /// Build a single-pair searcher.
    pub fn build(self) -> Result<CorrelationSearcher, MetricsError> {
        if self.config.tolshift == 0 {
            return Err(MetricsError::invalid_argument("tolshift must be at least 1"));
        }
        let mut config = self.config;
        // Single searches default to a sequential scan
        config.parallel = self.parallel.unwrap_or(false);
        Ok(CorrelationSearcher { config })
    }
}

/// Configured single-pair correlation searcher.
#[derive(Debug, Clone)]
pub struct CorrelationSearcher {
    config: SearchConfig,
}

impl CorrelationSearcher {
    /// Search the shifts between `a` and `b`.
    pub fn fit<T, I1, I2>(&self, a: &I1, b: &I2) -> Result<CorrelationResult<T>, MetricsError>
    where
        T: Float + Send + Sync,
        I1: SignalInput<T> + ?Sized,
        I2: SignalInput<T> + ?Sized,
    {
        SearchExecutor::run(a.as_signal_slice()?, b.as_signal_slice()?, &self.config)
    }

    /// The validated configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
