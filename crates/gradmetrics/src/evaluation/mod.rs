//! Layer 4: Evaluation
//!
//! ## Purpose
//!
//! This layer provides the metrics that score how well two gradient maps
//! agree: distances between clusters, the spread of a network within a
//! map, and the squared error left after alignment.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Mean squared error between aligned clusters.
pub mod alignment;

/// Closest-pair and centroid distances between clusters.
pub mod cluster;

/// Network spread and hull volume.
pub mod volume;
