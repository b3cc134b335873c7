//! Batch adapter for correlation search over many signal pairs.
//!
//! ## Purpose
//!
//! This module runs the lag-tolerant correlation search over a collection of
//! independent signal pairs, such as one pair per brain region. Pairs share
//! no state, so they are distributed across CPU cores.
//!
//! ## Design notes
//!
//! * **Processing**: Each pair is validated and searched independently.
//! * **Delegation**: Per-pair work is delegated to the execution engine.
//! * **Parallelism**: Pairs are spread over `rayon` workers; each pair's shift
//!   scan runs sequentially to avoid oversubscription.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Pair lists**: `fit` takes a slice of `(a, b)` pairs.
//! * **Row pairing**: `fit_rows` pairs row `i` of one matrix with row `i` of
//!   another (signals × time).
//!
//! ## Invariants
//!
//! * Output order matches input order.
//! * The first failing pair aborts the batch with its error.
//! * Parallel and sequential runs produce identical results.
//!
//! ## Non-goals
//!
//! * This adapter does not stream pairs from an external source.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::engine::executor::{CorrelationResult, SearchConfig, SearchExecutor};
use crate::input::{ClusterInput, SignalInput};
use crate::primitives::errors::MetricsError;

// ============================================================================
// Batch Correlation Search Builder
// ============================================================================

/// Builder for a batch correlation search.
#[derive(Debug, Clone)]
pub struct BatchCorrelationSearchBuilder {
    /// Per-pair search configuration.
    pub config: SearchConfig,
    /// Whether pairs are processed in parallel.
    pub parallel: bool,
}

impl Default for BatchCorrelationSearchBuilder {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl BatchCorrelationSearchBuilder {
    /// Create a batch builder from a base search configuration.
    ///
    /// # Defaults
    ///
    /// * parallel: true
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            parallel: true,
        }
    }

    /// Set parallel execution across pairs.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the exclusive maximum shift.
    pub fn tolshift(mut self, tolshift: usize) -> Self {
        self.config.tolshift = tolshift;
        self
    }

    /// Enable reporting the winning offset and p-value.
    pub fn find(mut self, enabled: bool) -> Self {
        self.config.find = enabled;
        self
    }

    /// Enable returning the candidate score sequences.
    pub fn return_scores(mut self, enabled: bool) -> Self {
        self.config.return_scores = enabled;
        self
    }

    /// Build the batch processor.
    pub fn build(self) -> Result<BatchCorrelationSearch, MetricsError> {
        if self.config.tolshift == 0 {
            return Err(MetricsError::invalid_argument("tolshift must be at least 1"));
        }

        // Pairs carry the parallelism; each scan stays sequential
        let mut config = self.config;
        config.parallel = false;

        Ok(BatchCorrelationSearch {
            config,
            parallel: self.parallel,
        })
    }
}

// ============================================================================
// Batch Correlation Search
// ============================================================================

/// Correlation search over many independent signal pairs.
#[derive(Debug, Clone)]
pub struct BatchCorrelationSearch {
    config: SearchConfig,
    parallel: bool,
}

impl BatchCorrelationSearch {
    /// Search every `(a, b)` pair.
    pub fn fit<T, I1, I2>(
        &self,
        pairs: &[(I1, I2)],
    ) -> Result<Vec<CorrelationResult<T>>, MetricsError>
    where
        T: Float + Send + Sync,
        I1: SignalInput<T>,
        I2: SignalInput<T>,
    {
        let views = pairs
            .iter()
            .map(|(a, b)| Ok((a.as_signal_slice()?, b.as_signal_slice()?)))
            .collect::<Result<Vec<_>, MetricsError>>()?;
        self.run(&views)
    }

    /// Search row `i` of `a` against row `i` of `b` for every row.
    pub fn fit_rows<T, C1, C2>(
        &self,
        a: &C1,
        b: &C2,
    ) -> Result<Vec<CorrelationResult<T>>, MetricsError>
    where
        T: Float + Send + Sync,
        C1: ClusterInput<T> + ?Sized,
        C2: ClusterInput<T> + ?Sized,
    {
        let a = a.as_cluster()?;
        let b = b.as_cluster()?;
        if a.n_points() != b.n_points() {
            return Err(MetricsError::shape_mismatch(
                "batch signal rows",
                a.n_points(),
                b.n_points(),
            ));
        }
        let views: Vec<(&[T], &[T])> = a.rows().zip(b.rows()).collect();
        self.run(&views)
    }

    fn run<T>(&self, views: &[(&[T], &[T])]) -> Result<Vec<CorrelationResult<T>>, MetricsError>
    where
        T: Float + Send + Sync,
    {
        debug!(
            pairs = views.len(),
            tolshift = self.config.tolshift,
            parallel = self.parallel,
            "running batch correlation search"
        );
        let config = &self.config;

        #[cfg(feature = "cpu")]
        {
            if self.parallel {
                return views
                    .par_iter()
                    .map(|&(a, b)| SearchExecutor::run(a, b, config))
                    .collect();
            }
        }

        views
            .iter()
            .map(|&(a, b)| SearchExecutor::run(a, b, config))
            .collect()
    }
}
