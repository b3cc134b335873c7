//! # gradmetrics
//!
//! Distance, volume and lag-tolerant correlation metrics for evaluating the
//! alignment of multi-dimensional gradient maps (e.g. brain-region
//! embeddings) and for detecting lagged correlation between signals.
//!
//! ## Quick start
//!
//! ```
//! use gradmetrics::prelude::*;
//!
//! let d = points_distance(&[0.0, 0.0], &[3.0, 4.0], PointMethod::L2).unwrap();
//! assert_eq!(d, 5.0);
//!
//! let a = vec![1.0, 5.0, 2.0, 8.0, 3.0, 9.0, 4.0];
//! let b = vec![5.0, 2.0, 8.0, 3.0, 9.0, 4.0, 0.0];
//! let res = CorrelationSearch::new()
//!     .tolshift(3)
//!     .find(true)
//!     .build()
//!     .unwrap()
//!     .fit(&a, &b)
//!     .unwrap();
//! assert_eq!(res.correlation, 1.0);
//! assert_eq!(res.offset.map(|o| o.as_tuple()), Some((1, 0)));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API          (api)
//!   ↓
//! Layer 6: Adapters     (adapters::batch)
//!   ↓
//! Layer 5: Engine       (engine::executor)
//!   ↓
//! Layer 4: Evaluation   (evaluation::{cluster, volume, alignment})
//!   ↓
//! Layer 3: Algorithms   (algorithms::{correlation, hull})
//!   ↓
//! Layer 2: Math         (math::{distance, stats, linalg, special})
//!   ↓
//! Layer 1: Primitives   (primitives::errors)
//! ```
//!
//! ## Features
//!
//! * `cpu` (default): rayon parallelism and ndarray input support.

#![deny(missing_docs)]

/// Layer 1: error taxonomy.
pub mod primitives;

/// Layer 2: numeric kernels.
pub mod math;

/// Layer 3: correlation and convex hull primitives.
pub mod algorithms;

/// Layer 4: cluster, volume and alignment metrics.
pub mod evaluation;

/// Layer 5: correlation search engine.
pub mod engine;

/// Layer 6: execution adapters.
pub mod adapters;

/// Layer 7: user-facing API.
pub mod api;

/// Input abstractions for slices, vectors and ndarray arrays.
pub mod input;

/// Commonly used items.
pub mod prelude {
    pub use crate::api::{
        cluster_distance, correlation_search, network_volume, pearsonr, points_distance,
        procrustes_score, Adapter, Batch, ClusterMethod, ClusterView, ConvexHull,
        CorrelationResult, CorrelationSearch, MetricsError, PearsonResult, PointMethod,
        ShiftOffset, ShiftScores, VolumeMethod,
    };
    pub use crate::input::{ClusterInput, SignalInput};
}
