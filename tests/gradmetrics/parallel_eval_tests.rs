use approx::assert_abs_diff_eq;
use gradmetrics::prelude::*;
use ndarray::Array2;

fn signal(n: usize, phase: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            (t * 0.21 + phase).sin() + 0.3 * (t * 0.05 + phase).cos()
        })
        .collect()
}

#[test] // Parallel batch must match the sequential batch pair for pair
fn test_parallel_batch_matches_sequential() {
    let pairs: Vec<(Vec<f64>, Vec<f64>)> = (0..24)
        .map(|k| {
            let a = signal(120, k as f64 * 0.4);
            let b: Vec<f64> = a.iter().skip(k % 5).copied().chain(signal(k % 5, 1.0)).collect();
            (a, b)
        })
        .collect();

    let build = |parallel: bool| {
        CorrelationSearch::new()
            .tolshift(8)
            .find(true)
            .return_scores(true)
            .adapter(Batch)
            .parallel(parallel)
            .build()
            .unwrap()
    };

    let seq = build(false).fit(&pairs).unwrap();
    let par = build(true).fit(&pairs).unwrap();

    assert_eq!(seq.len(), pairs.len());
    assert_eq!(seq, par);

    // Each b was built from a shifted forward by k % 5
    for (k, res) in seq.iter().enumerate() {
        let offset = res.offset.unwrap();
        assert_eq!(offset.shift_a, k % 5, "pair {}", k);
        assert_eq!(offset.shift_b, 0, "pair {}", k);
        assert_abs_diff_eq!(res.correlation, 1.0, epsilon = 1e-12);
    }
}

#[test] // Parallel shift scan must produce the same candidate scores
fn test_parallel_scan_matches_sequential() {
    let a = signal(400, 0.0);
    let b = signal(400, 0.9);

    let seq = CorrelationSearch::new()
        .tolshift(50)
        .find(true)
        .return_scores(true)
        .parallel(false)
        .build()
        .unwrap()
        .fit(&a, &b)
        .unwrap();
    let par = CorrelationSearch::new()
        .tolshift(50)
        .find(true)
        .return_scores(true)
        .parallel(true)
        .build()
        .unwrap()
        .fit(&a, &b)
        .unwrap();

    assert_eq!(seq, par);
    let scores = par.scores.unwrap();
    assert_eq!(scores.forward_a.len(), 50);
    assert_eq!(scores.forward_b.len(), 49);
}

#[test] // Closest-pair search switches to rayon above a size threshold
fn test_large_cluster_distance_matches_brute_force() {
    let n_a = 180;
    let n_b = 150;
    let a = Array2::from_shape_fn((n_a, 3), |(i, j)| ((i * 7 + j * 3) as f64 * 0.13).sin() * 4.0);
    let b = Array2::from_shape_fn((n_b, 3), |(i, j)| ((i * 5 + j * 11) as f64 * 0.29).cos() * 4.0 + 6.0);

    for pmethod in [PointMethod::L0, PointMethod::L1, PointMethod::L2] {
        let mut expected = f64::INFINITY;
        for ra in a.rows() {
            for rb in b.rows() {
                let d = points_distance(&ra, &rb, pmethod).unwrap();
                expected = expected.min(d);
            }
        }

        let got = cluster_distance(&a, &b, ClusterMethod::Closest, pmethod).unwrap();
        assert_eq!(got, expected, "{}", pmethod);
    }
}
