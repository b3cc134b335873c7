//! Layer 2: Math
//!
//! ## Purpose
//!
//! This layer provides the numeric kernels every metric is built on: point
//! norms, descriptive statistics, dense determinants and the special
//! functions behind correlation significance.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```
//!

/// Point-to-point distances (L0/L1/L2).
pub mod distance;

/// Dense linear algebra helpers.
pub mod linalg;

/// Special functions (log-gamma, incomplete beta).
pub mod special;

/// Descriptive statistics.
pub mod stats;
