//! Layer 1: Primitives
//!
//! ## Purpose
//!
//! This layer holds the building blocks shared by every other layer,
//! currently the error taxonomy.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types for metric computation.
pub mod errors;
