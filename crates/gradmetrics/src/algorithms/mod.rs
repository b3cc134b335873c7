//! Layer 3: Algorithms
//!
//! ## Purpose
//!
//! This layer provides the two non-trivial primitives the metrics rely on:
//! Pearson correlation with its significance, and the convex hull of a
//! point cloud in any dimension.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Pearson correlation coefficient and p-value.
pub mod correlation;

/// Incremental convex hull and its volume.
pub mod hull;
