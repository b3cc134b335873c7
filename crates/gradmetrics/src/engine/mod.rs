//! Layer 5: Engine
//!
//! ## Purpose
//!
//! This layer provides the execution engine for lag-tolerant correlation
//! search: shift scoring (sequential or rayon-parallel), extreme selection
//! and offset lookup.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Shift scan and selection for correlation search.
pub mod executor;
