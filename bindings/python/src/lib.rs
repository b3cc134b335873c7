//! Python bindings for gradmetrics.
//!
//! Provides Python access to the gradmetrics Rust library via PyO3.

#![deny(missing_docs)]

use numpy::{PyArray1, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::fmt::Display;

use ::gradmetrics::evaluation::volume::DEFAULT_POINT_METHOD;
use ::gradmetrics::prelude::{
    Batch, ClusterMethod, ConvexHull, CorrelationResult, CorrelationSearch, PointMethod,
    VolumeMethod,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a MetricsError to a PyErr
fn to_py_error(e: impl Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Parse point distance method from string
fn parse_point_method(name: &str) -> PyResult<PointMethod> {
    name.parse().map_err(to_py_error)
}

/// Parse cluster distance method from string
fn parse_cluster_method(name: &str) -> PyResult<ClusterMethod> {
    name.parse().map_err(to_py_error)
}

/// Parse network volume method from string
fn parse_volume_method(name: &str) -> PyResult<VolumeMethod> {
    name.parse().map_err(to_py_error)
}

// ============================================================================
// Python Classes
// ============================================================================

/// Result of a lag-tolerant correlation search.
#[pyclass(name = "CorrelationResult")]
pub struct PyCorrelationResult {
    inner: CorrelationResult<f64>,
}

#[pymethods]
impl PyCorrelationResult {
    /// Correlation of largest magnitude
    #[getter]
    fn correlation(&self) -> f64 {
        self.inner.correlation
    }

    /// Winning (shift_a, shift_b) offset, if requested
    #[getter]
    fn offset(&self) -> Option<(usize, usize)> {
        self.inner.offset.map(|o| o.as_tuple())
    }

    /// Two-sided p-value at the winning offset, if requested
    #[getter]
    fn pvalue(&self) -> Option<f64> {
        self.inner.pvalue
    }

    /// Scores for A shifted forward by 0..tolshift
    #[getter]
    fn scores_a<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray1<f64>>> {
        self.inner
            .scores
            .as_ref()
            .map(|s| PyArray1::from_vec(py, s.forward_a.clone()))
    }

    /// Scores for B shifted forward by 1..tolshift
    #[getter]
    fn scores_b<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray1<f64>>> {
        self.inner
            .scores
            .as_ref()
            .map(|s| PyArray1::from_vec(py, s.forward_b.clone()))
    }

    fn __repr__(&self) -> String {
        match (self.inner.offset, self.inner.pvalue) {
            (Some(offset), Some(p)) => format!(
                "CorrelationResult(correlation={:.6}, offset={}, pvalue={:.6e})",
                self.inner.correlation, offset, p
            ),
            _ => format!("CorrelationResult(correlation={:.6})", self.inner.correlation),
        }
    }
}

// ============================================================================
// Metric Functions
// ============================================================================

/// Distance between two points.
///
/// Parameters
/// ----------
/// p1, p2 : array_like
///     Points of identical length.
/// pmethod : str, optional
///     "L0" (max), "L1" (sum) or "L2" (euclidean), case-insensitive.
///     Default: "L1".
#[pyfunction]
#[pyo3(signature = (p1, p2, pmethod="L1"))]
fn points_distance<'py>(
    p1: PyReadonlyArray1<'py, f64>,
    p2: PyReadonlyArray1<'py, f64>,
    pmethod: &str,
) -> PyResult<f64> {
    let pmethod = parse_point_method(pmethod)?;
    ::gradmetrics::prelude::points_distance(
        &p1.as_array().as_standard_layout(),
        &p2.as_array().as_standard_layout(),
        pmethod,
    )
    .map_err(to_py_error)
}

/// Distance between two clusters of points (rows).
///
/// Parameters
/// ----------
/// c1, c2 : ndarray, shape (n_points, n_features)
/// method : str, optional
///     "closest" or "centroid", case-insensitive. Default: "closest".
/// pmethod : str, optional
///     Point distance method. Default: "L1".
#[pyfunction]
#[pyo3(signature = (c1, c2, method="closest", pmethod="L1"))]
fn cluster_distance<'py>(
    c1: PyReadonlyArray2<'py, f64>,
    c2: PyReadonlyArray2<'py, f64>,
    method: &str,
    pmethod: &str,
) -> PyResult<f64> {
    let method = parse_cluster_method(method)?;
    let pmethod = parse_point_method(pmethod)?;
    ::gradmetrics::prelude::cluster_distance(
        &c1.as_array().as_standard_layout(),
        &c2.as_array().as_standard_layout(),
        method,
        pmethod,
    )
    .map_err(to_py_error)
}

/// Spread of a gradient map around a network of regions.
///
/// Parameters
/// ----------
/// grad : ndarray, shape (n_regions, n_features)
/// networkidx : list of int
///     Row indices of the network's regions.
/// method : str, optional
///     "distance" or "hull", case-insensitive. Default: "distance".
/// pmethod : str, optional
///     Point distance method used by "distance". Default: "L2".
#[pyfunction]
#[pyo3(signature = (grad, networkidx, method="distance", pmethod=None))]
fn network_volume<'py>(
    grad: PyReadonlyArray2<'py, f64>,
    networkidx: Vec<usize>,
    method: &str,
    pmethod: Option<&str>,
) -> PyResult<f64> {
    let method = parse_volume_method(method)?;
    let pmethod = match pmethod {
        Some(name) => parse_point_method(name)?,
        None => DEFAULT_POINT_METHOD,
    };
    ::gradmetrics::prelude::network_volume(
        &grad.as_array().as_standard_layout(),
        &networkidx,
        method,
        pmethod,
    )
    .map_err(to_py_error)
}

/// Volume of the convex hull of every row of `points`.
#[pyfunction]
fn convex_hull_volume<'py>(points: PyReadonlyArray2<'py, f64>) -> PyResult<f64> {
    let points = points.as_array();
    let points = points.as_standard_layout();
    let view = ::gradmetrics::input::ClusterInput::as_cluster(&points).map_err(to_py_error)?;
    ConvexHull::new(&view)
        .map(|hull| hull.volume())
        .map_err(to_py_error)
}

/// Mean squared alignment error per region.
#[pyfunction]
fn procrustes_score<'py>(
    reference: PyReadonlyArray2<'py, f64>,
    aligned: PyReadonlyArray2<'py, f64>,
) -> PyResult<f64> {
    ::gradmetrics::prelude::procrustes_score(
        &reference.as_array().as_standard_layout(),
        &aligned.as_array().as_standard_layout(),
    )
    .map_err(to_py_error)
}

/// Pearson correlation and its two-sided p-value.
#[pyfunction]
fn pearsonr<'py>(
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
) -> PyResult<(f64, f64)> {
    let res = ::gradmetrics::prelude::pearsonr(x.as_slice()?, y.as_slice()?).map_err(to_py_error)?;
    Ok((res.statistic, res.pvalue))
}

// ============================================================================
// Correlation Search
// ============================================================================

/// Lag-tolerant correlation search between two signals.
///
/// Parameters
/// ----------
/// arr1, arr2 : array_like
///     Signals of identical length.
/// tolshift : int, optional
///     Exclusive maximum shift. Default: 1 (plain Pearson).
/// find : bool, optional
///     Also report the winning offset and p-value. Default: False.
/// parallel : bool, optional
///     Score shifts in parallel. Default: False.
///
/// Returns
/// -------
/// float, or (r, (shift_a, shift_b), pvalue) when `find` is True
#[pyfunction]
#[pyo3(signature = (arr1, arr2, tolshift=1, find=false, parallel=false))]
fn correlation_search<'py>(
    py: Python<'py>,
    arr1: PyReadonlyArray1<'py, f64>,
    arr2: PyReadonlyArray1<'py, f64>,
    tolshift: usize,
    find: bool,
    parallel: bool,
) -> PyResult<Bound<'py, PyAny>> {
    let searcher = CorrelationSearch::new()
        .tolshift(tolshift)
        .find(find)
        .parallel(parallel)
        .build()
        .map_err(to_py_error)?;

    let res = searcher
        .fit(
            &arr1.as_array().as_standard_layout(),
            &arr2.as_array().as_standard_layout(),
        )
        .map_err(to_py_error)?;

    if !find {
        return Ok(res.correlation.into_pyobject(py)?.into_any());
    }
    let offset = res.offset.map(|o| o.as_tuple());
    Ok((res.correlation, offset, res.pvalue)
        .into_pyobject(py)?
        .into_any())
}

/// Correlation search of row i of `arr1` against row i of `arr2`.
///
/// Parameters
/// ----------
/// arr1, arr2 : ndarray, shape (n_signals, n_timepoints)
/// tolshift : int, optional
///     Exclusive maximum shift. Default: 1.
/// find : bool, optional
///     Report winning offsets and p-values. Default: False.
/// return_scores : bool, optional
///     Keep every candidate correlation. Default: False.
/// parallel : bool, optional
///     Process rows in parallel. Default: True.
#[pyfunction]
#[pyo3(signature = (arr1, arr2, tolshift=1, find=false, return_scores=false, parallel=true))]
fn correlation_search_batch<'py>(
    arr1: PyReadonlyArray2<'py, f64>,
    arr2: PyReadonlyArray2<'py, f64>,
    tolshift: usize,
    find: bool,
    return_scores: bool,
    parallel: bool,
) -> PyResult<Vec<PyCorrelationResult>> {
    let search = CorrelationSearch::new()
        .tolshift(tolshift)
        .find(find)
        .return_scores(return_scores)
        .adapter(Batch)
        .parallel(parallel)
        .build()
        .map_err(to_py_error)?;

    let results = search
        .fit_rows(
            &arr1.as_array().as_standard_layout(),
            &arr2.as_array().as_standard_layout(),
        )
        .map_err(to_py_error)?;

    Ok(results
        .into_iter()
        .map(|inner| PyCorrelationResult { inner })
        .collect())
}

// ============================================================================
// Module Registration
// ============================================================================

/// Gradient alignment metrics.
#[pymodule]
fn pygradmetrics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCorrelationResult>()?;
    m.add_function(wrap_pyfunction!(points_distance, m)?)?;
    m.add_function(wrap_pyfunction!(cluster_distance, m)?)?;
    m.add_function(wrap_pyfunction!(network_volume, m)?)?;
    m.add_function(wrap_pyfunction!(convex_hull_volume, m)?)?;
    m.add_function(wrap_pyfunction!(procrustes_score, m)?)?;
    m.add_function(wrap_pyfunction!(pearsonr, m)?)?;
    m.add_function(wrap_pyfunction!(correlation_search, m)?)?;
    m.add_function(wrap_pyfunction!(correlation_search_batch, m)?)?;
    Ok(())
}
