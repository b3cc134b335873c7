//! Layer 6: Adapters
//!
//! ## Purpose
//!
//! This layer provides execution adapters that drive the engine over
//! collections of inputs.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Parallel batch search over many signal pairs.
pub mod batch;
