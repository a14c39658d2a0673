//! Tree building integration tests.
//!
//! Focused on structure and invariants of built trees.

use std::collections::HashMap;

use approx::assert_abs_diff_eq;
use arbor::data::{Dataset, DatasetBuilder, DatasetError};
use arbor::testing::{categorical_mock, separable_blobs, train_test_split};
use arbor::training::{Impurity, TreeBuilder};
use arbor::{Classifier, DecisionTree, Parallelism, TreeNode};
use ndarray::{array, concatenate, Array1, Array2, Axis};
use rstest::rstest;

/// Ten points per class, two classes, one numeric feature.
fn even_two_class() -> Dataset {
    let features = Array2::from_shape_fn((1, 20), |(_, i)| i as f64);
    let labels: Array1<usize> = (0..20).map(|i| i % 2).collect();
    Dataset::new(features.view(), labels.view()).unwrap()
}

#[test]
fn large_min_leaf_builds_leaf_only_tree() {
    let ds = even_two_class();
    let tree = TreeBuilder::new(Impurity::Gini, 1000)
        .build(&ds, 2, Parallelism::Sequential)
        .unwrap();

    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().n_children(), 0);
    assert_abs_diff_eq!(tree.root().probabilities()[0], 0.5);
    assert_abs_diff_eq!(tree.root().probabilities()[1], 0.5);

    let classifier = Classifier::new(&tree);
    let features = ds.features();
    for i in 0..ds.n_samples() {
        let (label, probabilities) = classifier.classify(features.column(i));
        assert_eq!(probabilities, tree.root().probabilities());
        assert_eq!(label, 0);
    }
}

#[test]
fn stump_has_leaf_children() {
    let ds = separable_blobs(20, 2, 3, 11);
    let tree = TreeBuilder::new(Impurity::Gini, 1)
        .with_max_depth(Some(1))
        .build(&ds, 2, Parallelism::Sequential)
        .unwrap();

    assert_eq!(tree.root().n_children(), 2);
    assert!(tree.root().children().iter().all(TreeNode::is_leaf));
    assert_eq!(tree.depth(), 1);
}

#[rstest]
fn perfect_training_accuracy(
    #[values(Impurity::Gini, Impurity::Information)] impurity: Impurity,
    #[values(2, 3, 5)] n_classes: usize,
) {
    let ds = separable_blobs(15, n_classes, 2, 3);
    let tree = TreeBuilder::new(impurity, 1)
        .build(&ds, n_classes, Parallelism::Sequential)
        .unwrap();
    assert!(tree.validate().is_ok());

    let classifier = Classifier::new(&tree);
    let features = ds.features();
    for (i, &truth) in ds.labels().iter().enumerate() {
        let (label, probabilities) = classifier.classify(features.column(i));
        assert_eq!(label, truth);
        for (c, &p) in probabilities.iter().enumerate() {
            assert_eq!(p, if c == truth { 1.0 } else { 0.0 });
        }
    }
}

/// Number of training samples routed to each leaf.
fn leaf_counts(tree: &DecisionTree, ds: &Dataset) -> Vec<usize> {
    let features = ds.features();
    let mut counts = HashMap::<*const TreeNode, usize>::new();
    for point in features.columns() {
        let mut node = tree.root();
        while let Some(split) = node.split() {
            let child = split.child_index(point[split.feature()]).unwrap();
            node = node.child(child).unwrap();
        }
        *counts.entry(node as *const TreeNode).or_default() += 1;
    }
    counts.into_values().collect()
}

#[test]
fn min_leaf_size_bounds_every_leaf() {
    let ds = categorical_mock(1000, 5);
    let min_leaf = 25;
    let tree = TreeBuilder::new(Impurity::Gini, min_leaf)
        .build(&ds, 5, Parallelism::Sequential)
        .unwrap();
    assert!(!tree.root().is_leaf());

    let counts = leaf_counts(&tree, &ds);
    assert_eq!(counts.len(), tree.n_leaves());
    assert!(counts.iter().all(|&count| count >= min_leaf));
}

#[test]
fn negative_nan_is_built_where_it_is_routed() {
    let features = array![[-f64::NAN, 1.0, 2.0, 3.0, 4.0]];
    let ds = Dataset::new(features.view(), array![0, 0, 1, 1, 1].view()).unwrap();
    let tree = TreeBuilder::new(Impurity::Gini, 2)
        .build(&ds, 2, Parallelism::Sequential)
        .unwrap();
    assert!(!tree.root().is_leaf());

    let counts = leaf_counts(&tree, &ds);
    assert_eq!(counts.len(), tree.n_leaves());
    assert!(counts.iter().all(|&count| count >= 2), "leaf counts {counts:?}");
}

#[test]
fn categorical_internal_nodes_have_k_children() {
    let ds = categorical_mock(800, 2);
    let tree = TreeBuilder::new(Impurity::Information, 10)
        .build(&ds, 5, Parallelism::Sequential)
        .unwrap();
    assert!(tree.validate().is_ok());

    let mut stack = vec![tree.root()];
    let mut saw_categorical = false;
    while let Some(node) = stack.pop() {
        if let Some(split) = node.split() {
            saw_categorical |= split.is_categorical();
            assert_eq!(node.n_children(), split.n_children());
            stack.extend(node.children());
        }
    }
    assert!(saw_categorical);
}

#[test]
fn parallel_build_matches_sequential() {
    let ds = categorical_mock(12_000, 8);
    let builder = TreeBuilder::new(Impurity::Gini, 5);
    let sequential = builder.build(&ds, 5, Parallelism::Sequential).unwrap();
    let parallel = builder.build(&ds, 5, Parallelism::Parallel).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn unit_weights_build_the_same_tree() {
    let ds = categorical_mock(600, 4);
    let weighted = ds
        .clone()
        .with_weights(Array1::ones(ds.n_samples()).view())
        .unwrap();
    let builder = TreeBuilder::new(Impurity::Gini, 5);
    assert_eq!(
        builder.build(&ds, 5, Parallelism::Sequential).unwrap(),
        builder.build(&weighted, 5, Parallelism::Sequential).unwrap()
    );
}

#[test]
fn weights_change_leaf_distribution() {
    let ds = DatasetBuilder::new()
        .add_feature("x", array![0.0, 0.0, 0.0, 0.0].view())
        .labels(array![0, 0, 1, 1].view())
        .weights(array![1.0, 1.0, 3.0, 3.0].view())
        .build()
        .unwrap();
    let tree = TreeBuilder::new(Impurity::Gini, 1)
        .build(&ds, 2, Parallelism::Sequential)
        .unwrap();
    assert!(tree.root().is_leaf());
    assert_abs_diff_eq!(tree.root().probabilities()[0], 0.25);
    assert_abs_diff_eq!(tree.root().probabilities()[1], 0.75);
}

#[test]
fn weights_change_the_chosen_feature() {
    // Each feature misplaces one sample: feature 0 misplaces sample 5,
    // feature 1 misplaces sample 2. Unweighted they tie and feature 0 wins.
    let features = array![[0.0, 0.0, 0.0, 1.0, 1.0, 0.0], [0.0, 0.0, 1.0, 1.0, 1.0, 1.0]];
    let labels = array![0, 0, 0, 1, 1, 1];
    let ds = Dataset::new(features.view(), labels.view()).unwrap();
    let builder = TreeBuilder::new(Impurity::Gini, 1).with_max_depth(Some(1));

    let tree = builder.build(&ds, 2, Parallelism::Sequential).unwrap();
    assert_eq!(tree.root().split().map(|s| s.feature()), Some(0));

    let weighted = ds
        .with_weights(array![1.0, 1.0, 0.01, 1.0, 1.0, 1.0].view())
        .unwrap();
    let tree = builder.build(&weighted, 2, Parallelism::Sequential).unwrap();
    assert_eq!(tree.root().split().map(|s| s.feature()), Some(1));
}

/// Appends a mislabelled copy of every sample with weight `noise_weight`.
fn with_weighted_noise(ds: &Dataset, n_classes: usize, noise_weight: f64) -> Dataset {
    let n = ds.n_samples();
    let features = concatenate(Axis(1), &[ds.features(), ds.features()]).unwrap();
    let noisy_labels = ds.labels().mapv(|label| (label + 1) % n_classes);
    let labels = concatenate(Axis(0), &[ds.labels(), noisy_labels.view()]).unwrap();
    let weights = Array1::from_shape_fn(2 * n, |i| if i < n { 1.0 } else { noise_weight });

    Dataset::new(features.view(), labels.view())
        .unwrap()
        .with_schema(ds.schema().clone())
        .unwrap()
        .with_weights(weights.view())
        .unwrap()
}

#[rstest]
fn low_weight_noise_does_not_hurt_accuracy(
    #[values(Impurity::Gini, Impurity::Information)] impurity: Impurity,
) {
    let ds = categorical_mock(3000, 42);
    let (train, test) = train_test_split(&ds, 0.3, 5);
    let noisy = with_weighted_noise(&train, 5, 1e-6);
    assert!(noisy.has_categorical());

    // Every sample is duplicated, so the leaf size doubles too.
    let tree = TreeBuilder::new(impurity, 20)
        .build(&noisy, 5, Parallelism::Sequential)
        .unwrap();
    assert!(tree.validate().is_ok());

    let batch = Classifier::new(&tree)
        .classify_batch(test.features(), Parallelism::Sequential)
        .unwrap();
    let correct = batch
        .labels
        .iter()
        .zip(test.labels())
        .filter(|(p, t)| p == t)
        .count();
    let acc = correct as f64 / test.n_samples() as f64;
    assert!(acc > 0.70, "{impurity:?} test accuracy {acc}");
}

#[test]
fn empty_dataset_is_rejected() {
    let ds = Dataset::new(Array2::<f64>::zeros((2, 0)).view(), Array1::<usize>::zeros(0).view()).unwrap();
    let err = TreeBuilder::new(Impurity::Gini, 1)
        .build(&ds, 2, Parallelism::Sequential)
        .unwrap_err();
    assert_eq!(err, DatasetError::EmptyDataset);
}

#[test]
fn serialized_tree_keeps_its_fields() {
    let ds = categorical_mock(300, 6);
    let tree = TreeBuilder::new(Impurity::Gini, 10)
        .build(&ds, 5, Parallelism::Sequential)
        .unwrap();

    let json = serde_json::to_string(&tree).unwrap();
    assert!(json.contains("\"kind\""));
    assert!(json.contains("\"probabilities\""));
    let restored: arbor::DecisionTree = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, tree);
}
