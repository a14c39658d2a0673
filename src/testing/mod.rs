//! Deterministic synthetic datasets for tests and benchmarks.
//!
//! Every generator takes a seed and is reproducible.

use std::f64::consts::PI;

use ndarray::{Array1, Array2};
use rand::prelude::*;

use crate::data::{Dataset, DatasetSchema, FeatureMeta};

/// Well-separated numeric clusters, one per class.
///
/// Class `c` draws every feature uniformly from `[10c, 10c + 1)`, so a single
/// threshold on any feature separates neighbouring classes. Samples are
/// interleaved by class.
pub fn separable_blobs(n_per_class: usize, n_classes: usize, n_features: usize, seed: u64) -> Dataset {
    let n_samples = n_per_class * n_classes;
    let mut rng = StdRng::seed_from_u64(seed);

    let labels: Array1<usize> = (0..n_samples).map(|i| i % n_classes).collect();
    let features = Array2::from_shape_fn((n_features, n_samples), |(_, i)| {
        10.0 * labels[i] as f64 + rng.r#gen::<f64>()
    });

    Dataset::from_parts(features, DatasetSchema::all_numeric(n_features), labels)
}

/// Five-class spiral with two noisy categorical features.
///
/// Features:
/// - 0, 1: numeric spiral coordinates; the radius grows with the sample index
/// - 2: categorical, 5 categories; matches the class with probability 0.8
/// - 3: categorical, 2 categories; pure noise
///
/// Samples are shuffled, so any prefix is a fair training split.
pub fn categorical_mock(n_samples: usize, seed: u64) -> Dataset {
    const BLOCK_LABELS: [usize; 5] = [1, 3, 2, 0, 4];
    let mut rng = StdRng::seed_from_u64(seed);

    let block = n_samples.div_ceil(BLOCK_LABELS.len()).max(1);
    let mut features = Array2::zeros((4, n_samples));
    let mut labels = Array1::zeros(n_samples);

    for i in 0..n_samples {
        let label = BLOCK_LABELS[(i / block).min(BLOCK_LABELS.len() - 1)];
        let magnitude = 2.0 + i as f64 / 200.0 + 0.5 * rng.r#gen::<f64>();
        let angle = (i % 200) as f64 * (2.0 * PI) / 200.0 + rng.r#gen::<f64>();

        let informative = if rng.r#gen::<f64>() < 0.8 {
            label
        } else {
            rng.gen_range(0..5)
        };

        features[[0, i]] = magnitude * angle.cos();
        features[[1, i]] = magnitude * angle.sin();
        features[[2, i]] = informative as f64;
        features[[3, i]] = rng.gen_range(0..2) as f64;
        labels[i] = label;
    }

    let schema = DatasetSchema::from_features(vec![
        FeatureMeta::numeric_named("x"),
        FeatureMeta::numeric_named("y"),
        FeatureMeta::categorical_named("c1", 5),
        FeatureMeta::categorical_named("c2", 2),
    ]);

    let mut order: Vec<usize> = (0..n_samples).collect();
    order.shuffle(&mut rng);
    Dataset::from_parts(features, schema, labels).subset(&order)
}

/// Deterministic train/test split.
///
/// Returns `(train, test)` with `test_fraction` of the samples in `test`.
pub fn train_test_split(dataset: &Dataset, test_fraction: f64, seed: u64) -> (Dataset, Dataset) {
    assert!((0.0..1.0).contains(&test_fraction));
    let n = dataset.n_samples();
    let mut idx: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let test_len = ((n as f64) * test_fraction).round() as usize;
    let (test, train) = idx.split_at(test_len.min(n));
    (dataset.subset(train), dataset.subset(test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blobs_are_reproducible() {
        let a = separable_blobs(5, 3, 2, 7);
        let b = separable_blobs(5, 3, 2, 7);
        assert_eq!(a.features(), b.features());
        assert_eq!(a.n_samples(), 15);
        assert_eq!(a.infer_n_classes(), 3);
    }

    #[test]
    fn mock_has_valid_categories() {
        let ds = categorical_mock(500, 1);
        assert_eq!(ds.n_features(), 4);
        assert_eq!(ds.infer_n_classes(), 5);
        assert!(ds.feature(2).iter().all(|&v| (0.0..5.0).contains(&v) && v.fract() == 0.0));
        assert!(ds.feature(3).iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn split_partitions_samples() {
        let ds = separable_blobs(10, 2, 1, 3);
        let (train, test) = train_test_split(&ds, 0.25, 9);
        assert_eq!(train.n_samples(), 15);
        assert_eq!(test.n_samples(), 5);
    }
}
