//! Error types for metric computation.
//!
//! ## Purpose
//!
//! Every fallible operation in the crate reports failures through
//! [`MetricsError`]. All operations are pure and deterministic, so an error
//! is never transient and is always returned to the immediate caller.
//!
//! ## Key concepts
//!
//! * **ShapeMismatch**: operands whose lengths or feature counts must agree.
//! * **InvalidArgument**: unknown method tags and out-of-range parameters.
//! * **DegenerateGeometry**: a convex hull cannot be built from the points.
//! * **EmptyInput**: a centroid or hull basis has no rows.

use thiserror::Error;

/// Errors raised by distance, volume, alignment and correlation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Operand shapes are incompatible where equality is required.
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Operation or operand that was checked
        context: &'static str,
        /// Expected length or feature count
        expected: usize,
        /// Length or feature count actually provided
        actual: usize,
    },

    /// An unrecognized tag or out-of-range parameter was supplied.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Convex hull computation is impossible for the given points.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A cluster or index set used as a basis for computation is empty.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Input storage cannot be viewed as required (e.g. non-contiguous arrays).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MetricsError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context,
            expected,
            actual,
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a DegenerateGeometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MetricsError::shape_mismatch("points_distance", 3, 2);
        assert_eq!(
            err.to_string(),
            "Shape mismatch in points_distance: expected 3, got 2"
        );

        let err = MetricsError::invalid_argument("Unknown point method: L3");
        assert_eq!(err.to_string(), "Invalid argument: Unknown point method: L3");

        let err = MetricsError::EmptyInput("network index set");
        assert_eq!(err.to_string(), "Empty input: network index set");
    }
}
