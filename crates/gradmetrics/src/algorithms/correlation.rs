//! Pearson correlation coefficient and its significance.
//!
//! ## Purpose
//!
//! This module computes the Pearson product-moment correlation of two
//! equal-length samples and the two-sided p-value for the null hypothesis of
//! zero correlation.
//!
//! ## Design notes
//!
//! * **Statistic only**: [`pearson_statistic`] skips the p-value for hot loops.
//! * **Significance**: Two-sided Student t tail of `t = r·sqrt((n - 2) / (1 - r²))`
//!   with `n - 2` degrees of freedom.
//!
//! ## Invariants
//!
//! * `r` lies in [-1, 1] and `p` lies in [0, 1].
//! * With exactly two samples `r` is ±1 and `p` is 1.
//! * A constant sample has no defined correlation: both values are NaN.

// External dependencies
use num_traits::Float;
use tracing::warn;

// Internal dependencies
use crate::math::special::student_t_two_sided;
use crate::math::stats::mean;
use crate::primitives::errors::MetricsError;

/// Result of a Pearson correlation test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PearsonResult<T> {
    /// Correlation coefficient.
    pub statistic: T,
    /// Two-sided p-value.
    pub pvalue: T,
}

fn validate<T>(x: &[T], y: &[T]) -> Result<(), MetricsError> {
    if x.len() != y.len() {
        return Err(MetricsError::shape_mismatch("pearsonr", x.len(), y.len()));
    }
    if x.len() < 2 {
        return Err(MetricsError::invalid_argument(format!(
            "Pearson correlation requires at least 2 samples, got {}",
            x.len()
        )));
    }
    Ok(())
}

/// Correlation coefficient of two samples without validation.
///
/// Returns NaN when either sample is empty or constant.
pub(crate) fn pearson_unchecked<T: Float>(x: &[T], y: &[T]) -> T {
    let (mean_x, mean_y) = match (mean(x), mean(y)) {
        (Some(mx), Some(my)) => (mx, my),
        _ => return T::nan(),
    };

    let (sxy, sxx, syy) = x.iter().zip(y).fold(
        (T::zero(), T::zero(), T::zero()),
        |(sxy, sxx, syy), (&xi, &yi)| {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
        },
    );

    if sxx == T::zero() || syy == T::zero() {
        return T::nan();
    }

    let r = sxy / (sxx * syy).sqrt();
    r.max(-T::one()).min(T::one())
}

/// Pearson correlation coefficient of two equal-length samples.
pub fn pearson_statistic<T: Float>(x: &[T], y: &[T]) -> Result<T, MetricsError> {
    validate(x, y)?;
    let r = pearson_unchecked(x, y);
    if r.is_nan() {
        warn!(n = x.len(), "constant input; correlation coefficient is undefined");
    }
    Ok(r)
}

/// Two-sided p-value of correlation `r` observed over `n` samples.
pub fn pearson_pvalue<T: Float>(r: T, n: usize) -> T {
    if r.is_nan() {
        return T::nan();
    }
    if n <= 2 {
        return T::one();
    }
    let r = r.to_f64().unwrap_or(f64::NAN);
    let df = (n - 2) as f64;
    // |r| = 1 gives an infinite statistic and a zero tail
    let t = r * (df / (1.0 - r * r)).sqrt();
    T::from(student_t_two_sided(t, df)).unwrap_or_else(T::nan)
}

/// Pearson correlation coefficient and two-sided p-value.
pub fn pearsonr<T: Float>(x: &[T], y: &[T]) -> Result<PearsonResult<T>, MetricsError> {
    let statistic = pearson_statistic(x, y)?;
    Ok(PearsonResult {
        statistic,
        pvalue: pearson_pvalue(statistic, x.len()),
    })
}
