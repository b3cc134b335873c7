use approx::{assert_abs_diff_eq, assert_relative_eq};
use gradmetrics::prelude::*;
use ndarray::{array, Array1, Array2};

#[test]
fn test_points_distance_scenario() {
    let p1 = array![0.0, 0.0];
    let p2 = array![3.0, 4.0];

    assert_abs_diff_eq!(points_distance(&p1, &p2, PointMethod::L2).unwrap(), 5.0);
    assert_abs_diff_eq!(points_distance(&p1, &p2, PointMethod::L1).unwrap(), 7.0);
    assert_abs_diff_eq!(points_distance(&p1, &p2, PointMethod::L0).unwrap(), 4.0);
}

#[test]
fn test_points_distance_rejects_broadcast() {
    let p = vec![1.0, 2.0, 3.0];
    let q = vec![1.0];
    let err = points_distance(&p, &q, PointMethod::L1).unwrap_err();
    assert!(matches!(err, MetricsError::ShapeMismatch { .. }));
}

#[test]
fn test_method_tags_parse_or_fail_loudly() {
    assert_eq!("L0".parse::<PointMethod>().unwrap(), PointMethod::L0);
    assert_eq!("centroid".parse::<ClusterMethod>().unwrap(), ClusterMethod::Centroid);
    assert_eq!("hull".parse::<VolumeMethod>().unwrap(), VolumeMethod::Hull);

    for bad in ["L9", "", "cosine"] {
        assert!(matches!(
            bad.parse::<PointMethod>(),
            Err(MetricsError::InvalidArgument(_))
        ));
    }
    assert!(matches!(
        "average".parse::<ClusterMethod>(),
        Err(MetricsError::InvalidArgument(_))
    ));
    assert!(matches!(
        "sphere".parse::<VolumeMethod>(),
        Err(MetricsError::InvalidArgument(_))
    ));
}

#[test]
fn test_cluster_distance_with_ndarray() {
    let a: Array2<f64> = array![[0.0, 0.0], [1.0, 1.0], [2.0, 0.5]];
    let b: Array2<f64> = array![[5.0, 5.0], [2.0, 1.5]];

    let closest = cluster_distance(&a, &b, ClusterMethod::Closest, PointMethod::L2).unwrap();
    assert_abs_diff_eq!(closest, 1.0, epsilon = 1e-12);

    let self_dist = cluster_distance(&a, &a, ClusterMethod::Closest, PointMethod::L1).unwrap();
    assert_eq!(self_dist, 0.0);

    // Centroids (1, 0.5) and (3.5, 3.25)
    let cent = cluster_distance(&a, &b, ClusterMethod::Centroid, PointMethod::L1).unwrap();
    assert_abs_diff_eq!(cent, 2.5 + 2.75, epsilon = 1e-12);
}

#[test]
fn test_cluster_distance_feature_mismatch() {
    let a: Array2<f64> = array![[0.0, 0.0]];
    let b: Array2<f64> = array![[0.0, 0.0, 0.0]];
    assert!(matches!(
        cluster_distance(&a, &b, ClusterMethod::Centroid, PointMethod::L2),
        Err(MetricsError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_network_volume_modes() {
    // Regions on a 2 x 2 x 2 cube plus its center
    let grad: Array2<f64> = array![
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [0.0, 2.0, 0.0],
        [2.0, 2.0, 0.0],
        [0.0, 0.0, 2.0],
        [2.0, 0.0, 2.0],
        [0.0, 2.0, 2.0],
        [2.0, 2.0, 2.0],
        [1.0, 1.0, 1.0],
    ];

    // Network = center region: eight corners at sqrt(3), center at 0
    let spread = network_volume(&grad, &[8], VolumeMethod::Distance, PointMethod::L2).unwrap();
    assert_relative_eq!(spread, 8.0 * 3.0_f64.sqrt() / 9.0, epsilon = 1e-12);

    let hull = network_volume(&grad, &[8], VolumeMethod::Hull, PointMethod::L2).unwrap();
    assert_relative_eq!(hull, 8.0, epsilon = 1e-10);

    let hull_other = network_volume(&grad, &[0, 1], VolumeMethod::Hull, PointMethod::L2).unwrap();
    assert_eq!(hull, hull_other);
}

#[test]
fn test_network_volume_errors() {
    let grad: Array2<f64> = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    assert_eq!(
        network_volume(&grad, &[], VolumeMethod::Distance, PointMethod::L2),
        Err(MetricsError::EmptyInput("network index set"))
    );
    assert!(matches!(
        network_volume(&grad, &[3], VolumeMethod::Distance, PointMethod::L2),
        Err(MetricsError::InvalidArgument(_))
    ));

    let coplanar: Array2<f64> = array![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ];
    assert!(matches!(
        network_volume(&coplanar, &[0], VolumeMethod::Hull, PointMethod::L2),
        Err(MetricsError::DegenerateGeometry(_))
    ));
}

#[test]
fn test_convex_hull_ignores_interior_cloud() {
    // Box corners plus deterministic interior jitter
    let mut data = vec![
        0.0, 0.0, 3.0, 0.0, 3.0, 2.0, 0.0, 2.0,
    ];
    for i in 1..40 {
        let t = i as f64;
        data.push(1.5 + 1.2 * (t * 0.7).sin());
        data.push(1.0 + 0.8 * (t * 1.3).cos());
    }
    let view = ClusterView::new(&data, 2).unwrap();
    let hull = ConvexHull::new(&view).unwrap();
    assert_relative_eq!(hull.volume(), 6.0, epsilon = 1e-10);
    assert_eq!(hull.vertex_indices(), vec![0, 1, 2, 3]);
}

#[test]
fn test_procrustes_score() {
    let reference: Array2<f64> = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
    let aligned: Array2<f64> = array![[1.0, 2.5], [3.0, 4.0], [4.0, 6.0]];

    assert_eq!(procrustes_score(&reference, &reference).unwrap(), 0.0);
    let score = procrustes_score(&reference, &aligned).unwrap();
    assert_abs_diff_eq!(score, (0.25 + 1.0) / 3.0, epsilon = 1e-12);
    assert_eq!(score, procrustes_score(&aligned, &reference).unwrap());

    let wrong: Array2<f64> = array![[1.0, 2.0], [3.0, 4.0]];
    assert!(matches!(
        procrustes_score(&reference, &wrong),
        Err(MetricsError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_correlation_search_tolshift_one_is_pearson() {
    let a = vec![0.2, 1.1, -0.7, 2.4, 0.3, -1.2, 0.8];
    let b = vec![0.5, 0.9, -0.1, 1.8, 0.7, -0.6, 0.0];

    let res = correlation_search(&a, &b, 1, true).unwrap();
    let baseline = pearsonr(&a, &b).unwrap();
    assert_eq!(res.correlation, baseline.statistic);
    assert_eq!(res.offset, Some(ShiftOffset::default()));
    assert_abs_diff_eq!(res.pvalue.unwrap(), baseline.pvalue, epsilon = 1e-15);
}

#[test]
fn test_correlation_search_shifted_ramp() {
    let a = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let b = Array1::from_vec(vec![0.0, 1.0, 2.0, 3.0, 4.0]);

    let res = CorrelationSearch::new()
        .tolshift(2)
        .find(true)
        .return_scores(true)
        .build()
        .unwrap()
        .fit(&a, &b)
        .unwrap();

    assert_eq!(res.correlation, 1.0);
    // Every candidate of a linear ramp is perfectly correlated; the first wins
    let scores = res.scores.unwrap();
    assert!(scores.forward_a.iter().chain(&scores.forward_b).all(|&r| r == 1.0));
    assert_eq!(res.offset, Some(ShiftOffset { shift_a: 0, shift_b: 0 }));
    assert_eq!(res.pvalue, Some(0.0));
}

#[test]
fn test_correlation_search_symmetric_tie_prefers_positive() {
    // Candidates are 0 (no shift), +1 (A shifted) and -1 (B shifted)
    let a = vec![1.0, 2.0, 3.0];
    let b = vec![1.0, 2.0, 1.0];
    let res = correlation_search(&a, &b, 2, true).unwrap();
    assert_eq!(res.correlation, 1.0);
    assert_eq!(res.offset.map(|o| o.as_tuple()), Some((1, 0)));
}

#[test]
fn test_correlation_search_detects_lag_of_b() {
    let base: Vec<f64> = (0..40).map(|i| ((i as f64) * 0.37).sin() + 0.1 * (i % 7) as f64).collect();
    // a leads b by three samples: a[i] == b[i + 3]
    let a: Vec<f64> = base[3..].iter().copied().chain([0.0, 0.0, 0.0]).collect();
    let b: Vec<f64> = base.clone();

    let res = correlation_search(&a, &b, 5, true).unwrap();
    assert_abs_diff_eq!(res.correlation, 1.0, epsilon = 1e-12);
    let offset = res.offset.unwrap();
    assert_eq!(offset.shift_a, 0);
    assert_eq!(offset.shift_b, 3);
    assert!(res.pvalue.unwrap() < 1e-10);
}

#[test]
fn test_correlation_search_strong_anticorrelation() {
    let a: Vec<f64> = (0..30).map(|i| ((i as f64) * 0.5).cos()).collect();
    let b: Vec<f64> = a.iter().map(|v| -2.0 * v + 1.0).collect();
    let res = correlation_search(&a, &b, 3, true).unwrap();
    assert_abs_diff_eq!(res.correlation, -1.0, epsilon = 1e-12);
    assert_eq!(res.offset.unwrap().lag(), 0);
}

#[test]
fn test_correlation_search_without_find() {
    let a = vec![1.0, 3.0, 2.0, 5.0, 4.0];
    let b = vec![2.0, 1.0, 4.0, 3.0, 6.0];
    let res = correlation_search(&a, &b, 2, false).unwrap();
    assert!(res.offset.is_none());
    assert!(res.pvalue.is_none());
    assert!(res.scores.is_none());
    assert!((-1.0..=1.0).contains(&res.correlation));
}

#[test]
fn test_correlation_search_validation() {
    let a = vec![1.0, 2.0, 3.0, 4.0];
    let short = vec![1.0, 2.0, 3.0];

    assert!(matches!(
        correlation_search(&a, &short, 1, false),
        Err(MetricsError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        correlation_search(&a, &a, 4, false),
        Err(MetricsError::InvalidArgument(_))
    ));
    assert!(matches!(
        CorrelationSearch::new().tolshift(0).build(),
        Err(MetricsError::InvalidArgument(_))
    ));
}

#[test]
fn test_batch_adapter_preserves_order() {
    let a1 = vec![1.0, 5.0, 2.0, 8.0, 3.0, 9.0, 4.0];
    let b1 = vec![5.0, 2.0, 8.0, 3.0, 9.0, 4.0, 0.0];
    let a2 = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let b2 = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];

    let results = CorrelationSearch::new()
        .tolshift(3)
        .find(true)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&[(a1, b1), (a2, b2)])
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].correlation, 1.0);
    assert_eq!(results[0].offset.map(|o| o.as_tuple()), Some((1, 0)));
    assert_eq!(results[1].correlation, -1.0);
}

#[test]
fn test_batch_adapter_rows_and_errors() {
    let a: Array2<f64> = array![[1.0, 2.0, 3.0, 4.0], [4.0, 1.0, 3.0, 2.0]];
    let b: Array2<f64> = array![[2.0, 4.0, 6.0, 8.0], [1.0, 2.0, 3.0, 4.0]];

    let search = CorrelationSearch::new()
        .tolshift(2)
        .adapter(Adapter::Batch)
        .parallel(false)
        .build()
        .unwrap();
    let results = search.fit_rows(&a, &b).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].correlation, 1.0);

    let c: Array2<f64> = array![[1.0, 2.0, 3.0, 4.0]];
    assert!(matches!(
        search.fit_rows(&a, &c),
        Err(MetricsError::ShapeMismatch { .. })
    ));

    // A single bad pair fails the whole batch
    let bad = vec![(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]), (vec![1.0, 2.0], vec![1.0, 2.0])];
    assert!(search.fit(&bad).is_err());
}

#[test]
fn test_correlation_search_skips_constant_window() {
    // The head a[..3] is constant, so B shifted by 4 has no defined correlation
    let a: Vec<f64> = vec![5.0, 5.0, 5.0, 1.0, 2.0, 9.0, 4.0];
    let b: Vec<f64> = vec![2.0, 7.0, 1.0, 8.0, 2.0, 8.0, 1.0];

    let res = CorrelationSearch::new()
        .tolshift(5)
        .find(true)
        .return_scores(true)
        .build()
        .unwrap()
        .fit(&a, &b)
        .unwrap();

    let scores = res.scores.as_ref().unwrap();
    assert!(scores.forward_b[3].is_nan());
    assert_eq!(scores.forward_b.iter().filter(|r| r.is_nan()).count(), 1);

    // Best defined candidate: a[4..] against b[..3]
    assert_abs_diff_eq!(res.correlation, 0.905_935_760_955_304_7, epsilon = 1e-12);
    assert_eq!(res.offset, Some(ShiftOffset { shift_a: 4, shift_b: 0 }));
    let p = res.pvalue.unwrap();
    assert!(p > 0.0 && p < 1.0);
}

#[test]
fn test_correlation_search_constant_signal_is_undefined() {
    let a: Vec<f64> = vec![3.0; 6];
    let b: Vec<f64> = vec![1.0, 4.0, 2.0, 6.0, 3.0, 5.0];

    let res = correlation_search(&a, &b, 3, true).unwrap();
    assert!(res.correlation.is_nan());
    assert!(res.offset.is_none());
    assert!(res.pvalue.is_none());
}
