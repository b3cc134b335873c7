//! Execution engine for lag-tolerant correlation search.
//!
//! ## Purpose
//!
//! This module scans a bounded window of shifts between two equal-length
//! signals, picks the correlation of largest magnitude, and optionally
//! reports the shift at which it occurs together with its significance.
//!
//! ## Design notes
//!
//! * **One-sided shifts**: Each candidate shifts exactly one signal; the
//!   search space is linear in `tolshift`.
//! * **Parallelism**: Shift candidates are independent and can be scored with
//!   `rayon`; results are always collected in shift order.
//! * **Determinism**: The outcome depends on order only through the
//!   tie-break, which is fixed.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Forward-A scores** (`S1`): `S1[0]` is the zero-shift correlation;
//!   `S1[i] = r(a[i..], b[..T-i])` for `i` in `1..tolshift`.
//! * **Forward-B scores** (`S2`): `S2[i-1] = r(a[..T-i], b[i..])`.
//! * **Extreme selection**: Take the max and min over `S1 ∪ S2`; the
//!   larger magnitude wins and ties go to the positive value.
//! * **Offset lookup**: The first matching index in `S1` gives `(k, 0)`;
//!   otherwise the first in `S2` gives `(0, j + 1)`.
//!
//! ## Invariants
//!
//! * `1 <= tolshift < T`, so every window holds at least two samples.
//! * Both signals have length `T`.
//! * Correlations lie in [-1, 1]; p-values lie in [0, 1].
//!
//! ## Non-goals
//!
//! * This module does not shift both signals in one candidate.
//! * This module does not support streaming input.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;
use std::fmt;
use tracing::{debug, warn};

// Internal dependencies
use crate::algorithms::correlation::{pearson_pvalue, pearson_unchecked};
use crate::primitives::errors::MetricsError;

// ============================================================================
// Configuration and Output
// ============================================================================

/// Configuration of a single correlation search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Exclusive upper bound on the shift applied to either signal.
    pub tolshift: usize,
    /// Whether to report the winning offset and its p-value.
    pub find: bool,
    /// Whether to return the candidate score sequences.
    pub return_scores: bool,
    /// Whether to score shift candidates in parallel.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tolshift: 1,
            find: false,
            return_scores: false,
            parallel: false,
        }
    }
}

/// Shift applied to each signal before correlating; at most one is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShiftOffset {
    /// Samples dropped from the front of signal A.
    pub shift_a: usize,
    /// Samples dropped from the front of signal B.
    pub shift_b: usize,
}

impl ShiftOffset {
    /// Total shift magnitude.
    pub fn lag(&self) -> usize {
        self.shift_a + self.shift_b
    }

    /// As an `(a, b)` tuple.
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.shift_a, self.shift_b)
    }
}

impl fmt::Display for ShiftOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.shift_a, self.shift_b)
    }
}

/// Candidate correlations evaluated by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftScores<T> {
    /// Zero shift followed by A shifted forward by `1..tolshift`.
    pub forward_a: Vec<T>,
    /// B shifted forward by `1..tolshift`.
    pub forward_b: Vec<T>,
}

/// Outcome of a correlation search.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationResult<T> {
    /// Correlation of largest magnitude across all evaluated shifts.
    pub correlation: T,
    /// Winning offset (with `find`).
    pub offset: Option<ShiftOffset>,
    /// Two-sided p-value at the winning offset (with `find`).
    pub pvalue: Option<T>,
    /// Candidate sequences (with `return_scores`).
    pub scores: Option<ShiftScores<T>>,
}

// ============================================================================
// Validation
// ============================================================================

/// Check signal lengths and the shift bound.
pub fn validate_search<T>(a: &[T], b: &[T], tolshift: usize) -> Result<(), MetricsError> {
    if a.len() != b.len() {
        return Err(MetricsError::shape_mismatch("correlation_search", a.len(), b.len()));
    }
    if tolshift == 0 {
        return Err(MetricsError::invalid_argument("tolshift must be at least 1"));
    }
    if tolshift >= a.len() {
        return Err(MetricsError::invalid_argument(format!(
            "tolshift {} must be less than the signal length {}",
            tolshift,
            a.len()
        )));
    }
    Ok(())
}

// ============================================================================
// Shift Scoring
// ============================================================================

/// Correlation of A shifted forward by `shift` against the head of B.
#[inline]
fn forward_a_score<T: Float>(a: &[T], b: &[T], shift: usize) -> T {
    let t = a.len();
    pearson_unchecked(&a[shift..], &b[..t - shift])
}

/// Correlation of the head of A against B shifted forward by `shift`.
#[inline]
fn forward_b_score<T: Float>(a: &[T], b: &[T], shift: usize) -> T {
    let t = a.len();
    pearson_unchecked(&a[..t - shift], &b[shift..])
}

/// Score every candidate shift sequentially.
pub fn score_pass<T: Float>(a: &[T], b: &[T], tolshift: usize) -> ShiftScores<T> {
    ShiftScores {
        forward_a: (0..tolshift).map(|i| forward_a_score(a, b, i)).collect(),
        forward_b: (1..tolshift).map(|i| forward_b_score(a, b, i)).collect(),
    }
}

/// Score every candidate shift in parallel.
#[cfg(feature = "cpu")]
pub fn score_pass_parallel<T>(a: &[T], b: &[T], tolshift: usize) -> ShiftScores<T>
where
    T: Float + Send + Sync,
{
    let (forward_a, forward_b) = rayon::join(
        || {
            (0..tolshift)
                .into_par_iter()
                .map(|i| forward_a_score(a, b, i))
                .collect::<Vec<T>>()
        },
        || {
            (1..tolshift)
                .into_par_iter()
                .map(|i| forward_b_score(a, b, i))
                .collect::<Vec<T>>()
        },
    );
    ShiftScores {
        forward_a,
        forward_b,
    }
}

/// Score every candidate shift (sequential without the `cpu` feature).
#[cfg(not(feature = "cpu"))]
pub fn score_pass_parallel<T>(a: &[T], b: &[T], tolshift: usize) -> ShiftScores<T>
where
    T: Float + Send + Sync,
{
    score_pass(a, b, tolshift)
}

// ============================================================================
// Selection
// ============================================================================

/// Correlation of largest magnitude; ties go to the positive candidate.
///
/// Undefined (NaN) candidates are skipped. Returns NaN if none is defined.
pub fn select_extreme<T: Float>(scores: &ShiftScores<T>) -> T {
    let defined = scores
        .forward_a
        .iter()
        .chain(&scores.forward_b)
        .copied()
        .filter(|v| !v.is_nan());

    let bounds = defined.fold(None, |acc: Option<(T, T)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    });

    match bounds {
        Some((corr_neg, corr_pos)) => {
            if corr_pos.abs() < corr_neg.abs() {
                corr_neg
            } else {
                corr_pos
            }
        }
        None => T::nan(),
    }
}

/// Offset of the first candidate equal to `value`, searching forward-A first.
pub fn locate_offset<T: Float>(scores: &ShiftScores<T>, value: T) -> Option<ShiftOffset> {
    if let Some(k) = scores.forward_a.iter().position(|&v| v == value) {
        return Some(ShiftOffset {
            shift_a: k,
            shift_b: 0,
        });
    }
    scores
        .forward_b
        .iter()
        .position(|&v| v == value)
        .map(|j| ShiftOffset {
            shift_a: 0,
            shift_b: j + 1,
        })
}

// ============================================================================
// Executor
// ============================================================================

/// Runs a correlation search under a fixed configuration.
pub struct SearchExecutor;

impl SearchExecutor {
    /// Run the search over `a` and `b`.
    pub fn run<T>(
        a: &[T],
        b: &[T],
        config: &SearchConfig,
    ) -> Result<CorrelationResult<T>, MetricsError>
    where
        T: Float + Send + Sync,
    {
        validate_search(a, b, config.tolshift)?;

        let scores = if config.parallel {
            score_pass_parallel(a, b, config.tolshift)
        } else {
            score_pass(a, b, config.tolshift)
        };

        let undefined = scores
            .forward_a
            .iter()
            .chain(&scores.forward_b)
            .filter(|v| v.is_nan())
            .count();
        if undefined > 0 {
            warn!(
                undefined,
                tolshift = config.tolshift,
                "constant window; skipping undefined correlation candidates"
            );
        }

        let correlation = select_extreme(&scores);

        let (offset, pvalue) = if config.find {
            match locate_offset(&scores, correlation) {
                Some(offset) => {
                    let overlap = a.len() - offset.lag();
                    (Some(offset), Some(pearson_pvalue(correlation, overlap)))
                }
                None => (None, None),
            }
        } else {
            (None, None)
        };

        debug!(
            tolshift = config.tolshift,
            correlation = correlation.to_f64(),
            offset = ?offset.map(|o| o.as_tuple()),
            "lagged correlation search complete"
        );

        Ok(CorrelationResult {
            correlation,
            offset,
            pvalue,
            scores: config.return_scores.then_some(scores),
        })
    }
}
